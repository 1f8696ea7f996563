use std::io::{self, Stdout, stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Borders, Gauge, List, ListItem, Paragraph};

use crate::cli::dice_display::{FACE_HEIGHT, render_values};
use crate::game::stats::roll_sum_histogram;
use crate::game::{DiceValues, GameState, RollEvent};
use crate::theme::ThemeState;

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

const SUM_LABELS: [&str; 11] = ["2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"];

/// Interactive dice table: rolls, undo, alchemist arming, pirate gauge and a
/// live sum histogram, drawn from the current theme palette.
pub struct TuiApp {
    state: GameState,
    theme: ThemeState,
    /// Seating used for `n` (restart with the same table).
    seating: Vec<String>,
    last_values: Option<DiceValues>,
    banner: Option<String>,
    /// Faces collected so far while arming the alchemist (0..=2 entries).
    alchemist_draft: Vec<u8>,
    arming_alchemist: bool,
    show_help: bool,
    should_quit: bool,
}

impl TuiApp {
    pub fn new(state: GameState, seating: Vec<String>, dark: bool) -> Self {
        Self {
            state,
            theme: ThemeState::new(dark),
            seating,
            last_values: None,
            banner: None,
            alchemist_draft: Vec::new(),
            arming_alchemist: false,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = loop {
            if self.should_quit {
                break Ok(());
            }

            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        };

        // Always restore the terminal, even on a draw error.
        let _ = disable_raw_mode();
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.arming_alchemist {
            self.handle_alchemist_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('h') => self.show_help = !self.show_help,
            KeyCode::Char('r') | KeyCode::Char(' ') | KeyCode::Enter => self.roll(),
            KeyCode::Char('u') => {
                self.state.undo_last_roll();
                self.last_values = self
                    .state
                    .roll_history
                    .first()
                    .map(|roll| roll.values.clone());
                self.banner = Some("Undid last roll".to_string());
            }
            KeyCode::Char('t') => {
                self.state.toggle_third_die();
                self.banner = Some(if self.state.third_die_enabled {
                    "Event die enabled, pirate counter reset".to_string()
                } else {
                    "Event die disabled, pirate counter reset".to_string()
                });
            }
            KeyCode::Char('d') => self.theme.toggle(),
            KeyCode::Char('a') => {
                self.arming_alchemist = true;
                self.alchemist_draft.clear();
            }
            KeyCode::Char('x') => {
                self.state.clear_alchemist();
                self.banner = Some("Alchemist cleared".to_string());
            }
            KeyCode::Char('e') => {
                self.state.end_current_game();
                self.banner = Some("Game archived".to_string());
            }
            KeyCode::Char('n') => {
                self.state.start_new_game(self.seating.clone());
                self.last_values = None;
                self.banner = Some("New game started".to_string());
            }
            KeyCode::Char('p') => self.state.reset_pirate_count(),
            KeyCode::Char('c') => self.state.clear_history(),
            _ => {}
        }
    }

    fn handle_alchemist_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(ch @ '1'..='6') => {
                self.alchemist_draft.push(ch as u8 - b'0');
                if self.alchemist_draft.len() == 2 {
                    let preset = (self.alchemist_draft[0], self.alchemist_draft[1]);
                    self.banner = match self.state.set_alchemist(preset, false) {
                        Ok(()) => Some(format!(
                            "Alchemist armed: next roll is {}+{}",
                            preset.0, preset.1
                        )),
                        Err(err) => Some(err.to_string()),
                    };
                    self.arming_alchemist = false;
                    self.alchemist_draft.clear();
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.arming_alchemist = false;
                self.alchemist_draft.clear();
                self.banner = Some("Alchemist arming cancelled".to_string());
            }
            _ => {}
        }
    }

    fn roll(&mut self) {
        if self.state.current_game.is_none() {
            self.banner = Some("No open game - press n to start one".to_string());
            return;
        }
        let values = self.state.roll_values();
        match self.state.add_roll(values) {
            Ok(outcome) => {
                self.last_values = Some(outcome.roll.values.clone());
                self.banner = announce(&outcome.events);
                if let Err(err) = self.state.next_turn() {
                    self.banner = Some(err.to_string());
                }
            }
            Err(err) => self.banner = Some(err.to_string()),
        }
    }

    fn render(&self, f: &mut Frame<'_>) {
        let colors = &self.theme.colors;
        let background = Block::default().style(Style::default().bg(hex_color(colors.background)));
        f.render_widget(background, f.size());

        if self.show_help {
            self.render_help(f, f.size());
            return;
        }

        let mut constraints = vec![
            Constraint::Length(4),
            Constraint::Length(FACE_HEIGHT as u16 + 2),
        ];
        if self.state.third_die_enabled {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(8));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(f.size());

        let mut idx = 0;
        self.render_header(f, chunks[idx]);
        idx += 1;
        self.render_dice(f, chunks[idx]);
        idx += 1;
        if self.state.third_die_enabled {
            self.render_pirate_gauge(f, chunks[idx]);
            idx += 1;
        }
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[idx]);
        self.render_histogram(f, body[0]);
        self.render_roll_log(f, body[1]);
        idx += 1;
        self.render_footer(f, chunks[idx]);
    }

    fn render_header(&self, f: &mut Frame<'_>, area: Rect) {
        let colors = &self.theme.colors;
        let current = self
            .state
            .current_player()
            .map(|player| player.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let game_status = if self.state.current_game.is_some() {
            format!("game open, {} archived", self.state.games.len())
        } else {
            format!("no open game, {} archived", self.state.games.len())
        };

        let mut status_spans = vec![Span::styled(
            format!("Round {}", self.state.round),
            Style::default()
                .fg(hex_color(colors.text))
                .add_modifier(Modifier::BOLD),
        )];
        status_spans.push(Span::styled(
            format!("  Current: {current}"),
            Style::default().fg(hex_color(colors.subtext)),
        ));
        if self.state.alchemist.is_active {
            let (a, b) = self.state.alchemist.preset_values;
            status_spans.push(Span::styled(
                format!("  [alchemist {a}+{b}]"),
                Style::default().fg(hex_color(colors.primary)),
            ));
        }

        let lines = vec![
            Line::from(status_spans),
            Line::from(Span::styled(
                game_status,
                Style::default().fg(hex_color(colors.subtext)),
            )),
        ];
        let header = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(hex_color(colors.border))),
            );
        f.render_widget(header, area);
    }

    fn render_dice(&self, f: &mut Frame<'_>, area: Rect) {
        let colors = &self.theme.colors;
        let mut lines: Vec<Line<'_>> = match &self.last_values {
            Some(values) => render_values(values)
                .into_iter()
                .map(|row| {
                    Line::from(Span::styled(
                        row,
                        Style::default().fg(hex_color(colors.text)),
                    ))
                })
                .collect(),
            None => vec![Line::from(Span::styled(
                "press r to roll",
                Style::default().fg(hex_color(colors.subtext)),
            ))],
        };
        if let Some(banner) = &self.banner {
            lines.push(Line::from(Span::styled(
                banner.clone(),
                Style::default()
                    .fg(hex_color(colors.primary))
                    .add_modifier(Modifier::BOLD),
            )));
        }
        let dice = Paragraph::new(lines).alignment(Alignment::Center);
        f.render_widget(dice, area);
    }

    fn render_pirate_gauge(&self, f: &mut Frame<'_>, area: Rect) {
        let colors = &self.theme.colors;
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(hex_color(colors.border)))
                    .title("Pirate fleet"),
            )
            .gauge_style(Style::default().fg(hex_color(colors.primary)))
            .ratio((self.state.pirate_progress() / 100.0).clamp(0.0, 1.0))
            .label(format!("{}/8", self.state.pirate_count));
        f.render_widget(gauge, area);
    }

    fn render_histogram(&self, f: &mut Frame<'_>, area: Rect) {
        let colors = &self.theme.colors;
        let histogram = roll_sum_histogram(&self.state.roll_history);
        let data: Vec<(&str, u64)> = SUM_LABELS
            .iter()
            .zip(histogram.iter())
            .map(|(label, &count)| (*label, u64::from(count)))
            .collect();
        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(hex_color(colors.border)))
                    .title(format!("Sums ({} rolls)", self.state.roll_history.len())),
            )
            .data(&data)
            .bar_width(3)
            .bar_gap(1)
            .bar_style(Style::default().fg(hex_color(colors.primary)))
            .value_style(
                Style::default()
                    .fg(hex_color(colors.surface))
                    .bg(hex_color(colors.primary)),
            );
        f.render_widget(chart, area);
    }

    fn render_roll_log(&self, f: &mut Frame<'_>, area: Rect) {
        let colors = &self.theme.colors;
        let items: Vec<ListItem<'_>> = self
            .state
            .roll_history
            .iter()
            .take(usize::from(area.height.saturating_sub(2)))
            .map(|roll| {
                let mut label = format!(
                    "R{} {} {}+{}={}",
                    roll.round,
                    roll.player,
                    roll.values[0],
                    roll.values[1],
                    roll.resource_sum(),
                );
                if let Some(event) = roll.event_die() {
                    label.push_str(&format!(" [E{event}]"));
                }
                ListItem::new(label).style(Style::default().fg(hex_color(colors.text)))
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(hex_color(colors.border)))
                .title("Roll log"),
        );
        f.render_widget(list, area);
    }

    fn render_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let colors = &self.theme.colors;
        let text = if self.arming_alchemist {
            match self.alchemist_draft.first() {
                Some(first) => format!("alchemist: first die {first}, pick the second (1-6)"),
                None => "alchemist: pick the first die (1-6), Esc cancels".to_string(),
            }
        } else {
            "r roll  u undo  a alchemist  t event die  e end game  n new game  d theme  h help  q quit"
                .to_string()
        };
        let footer = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(hex_color(colors.subtext)));
        f.render_widget(footer, area);
    }

    fn render_help(&self, f: &mut Frame<'_>, area: Rect) {
        let colors = &self.theme.colors;
        let entries = [
            ("r / space / enter", "roll and advance the turn"),
            ("u", "undo the last roll (single level)"),
            ("a", "arm the alchemist: type two faces"),
            ("x", "clear an armed alchemist"),
            ("t", "toggle the Cities & Knights event die"),
            ("p", "reset the pirate counter"),
            ("e", "end and archive the open game"),
            ("n", "start a new game, same seating"),
            ("c", "clear the session roll history"),
            ("d", "toggle dark mode"),
            ("h", "close this help"),
            ("q / esc", "quit"),
        ];
        let lines: Vec<Line<'_>> = entries
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(
                        format!("{keys:>18}  "),
                        Style::default()
                            .fg(hex_color(colors.primary))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*what, Style::default().fg(hex_color(colors.text))),
                ])
            })
            .collect();
        let help = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(hex_color(colors.border)))
                .title("Keys"),
        );
        f.render_widget(help, area);
    }
}

fn announce(events: &[RollEvent]) -> Option<String> {
    if events.is_empty() {
        return None;
    }
    let parts: Vec<String> = events
        .iter()
        .map(|event| match event {
            RollEvent::AlchemistConsumed => "Alchemist spent".to_string(),
            RollEvent::Robber => "Robber! The dice sum to 7".to_string(),
            RollEvent::CityGate(color) => format!("City gate: {color}"),
            RollEvent::PirateAttack => "The pirates are attacking!".to_string(),
        })
        .collect();
    Some(parts.join(" | "))
}

/// "#rrggbb" to an RGB terminal color; anything else falls back to default.
fn hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::Reset;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(0);
    Color::Rgb(channel(0..2), channel(2..4), channel(4..6))
}
