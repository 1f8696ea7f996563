use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use uuid::Uuid;

use crate::types::CityColor;

use super::{
    game::Game,
    players::{Player, roster_from_names},
    roll::{AlchemistState, DiceRoll, DiceValues, PIRATE_ATTACK_THRESHOLD, now_millis},
    stats::is_robber_event,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for the dice rng; `None` draws from entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("no players at the table")]
    EmptyRoster,
    #[error("expected 2 or 3 dice, got {0}")]
    WrongDiceCount(usize),
    #[error("die face {0} outside 1..=6")]
    DieOutOfRange(u8),
}

/// Table events derived from a single roll, in the order they should be
/// announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollEvent {
    /// The alchemist preset was spent on this roll.
    AlchemistConsumed,
    /// Resource dice summed to 7.
    Robber,
    /// Event die came up 1-3.
    CityGate(CityColor),
    /// Eighth qualifying event-die roll reached.
    PirateAttack,
}

#[derive(Debug, Clone)]
pub struct RollOutcome {
    pub roll: DiceRoll,
    pub events: Vec<RollEvent>,
}

/// The four fields a roll snapshots for undo. Single slot: a new roll
/// overwrites it, and undoing clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoSnapshot {
    current_player_index: usize,
    round: u32,
    roll_history: Vec<DiceRoll>,
    pirate_count: u8,
}

/// The whole table: roster, turn/round progression, session roll history,
/// the open game, completed games, the pirate counter and the alchemist
/// override. All mutations run synchronously to completion; the caller owns
/// the single instance.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    /// Starts at 1; bumps when the turn index wraps back to seat 0.
    pub round: u32,
    pub third_die_enabled: bool,
    /// Most-recent-first. Parallel to the open game's own roll list; after an
    /// undo the two may legitimately disagree.
    pub roll_history: Vec<DiceRoll>,
    /// Completed games, most-recent-first.
    pub games: Vec<Game>,
    pub current_game: Option<Game>,
    /// 0..=8, meaningful only while the third die is enabled.
    pub pirate_count: u8,
    pub alchemist: AlchemistState,
    previous_state: Option<UndoSnapshot>,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            players: Vec::new(),
            current_player_index: 0,
            round: 1,
            third_die_enabled: false,
            roll_history: Vec::new(),
            games: Vec::new(),
            current_game: None,
            pirate_count: 0,
            alchemist: AlchemistState::default(),
            previous_state: None,
            rng,
        }
    }

    /// Full hard reset back to the initial table. The only operation that
    /// clears completed-game history.
    pub fn reset(&mut self) {
        *self = GameState::new(self.config.clone());
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn add_player(&mut self, name: impl Into<String>) {
        self.players.push(Player::new(name));
    }

    pub fn remove_player(&mut self, id: Uuid) {
        self.players.retain(|player| player.id != id);
    }

    /// Replaces the seating order wholesale. An open game keeps the snapshot
    /// it took at start.
    pub fn reorder_players(&mut self, players: Vec<Player>) {
        self.players = players;
    }

    /// Opens a fresh game and replaces the roster with one derived from
    /// `names`. An already-open game is dropped without being archived;
    /// callers that want its history must `end_current_game` first.
    pub fn start_new_game<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roster = roster_from_names(names);
        self.current_game = Some(Game::open(roster.clone()));
        self.players = roster;
        self.roll_history.clear();
        self.round = 1;
        self.current_player_index = 0;
        self.pirate_count = 0;
        self.alchemist = AlchemistState::default();
    }

    /// Stamps the end time and archives the open game. No-op when nothing is
    /// open. Round, turn index and session history deliberately survive.
    pub fn end_current_game(&mut self) {
        let Some(mut game) = self.current_game.take() else {
            return;
        };
        game.close();
        self.games.insert(0, game);
        self.players.clear();
    }

    /// Advances to the next seat; bumps the round when the index wraps.
    pub fn next_turn(&mut self) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::EmptyRoster);
        }
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        if self.current_player_index == 0 {
            self.round += 1;
        }
        Ok(())
    }

    pub fn toggle_third_die(&mut self) {
        self.third_die_enabled = !self.third_die_enabled;
        self.pirate_count = 0;
    }

    /// Generates the next dice vector without recording anything: two
    /// resource dice, plus the event die when enabled. An active alchemist
    /// pins the resource dice and leaves the event die random.
    pub fn roll_values(&mut self) -> DiceValues {
        let mut values: DiceValues = if self.alchemist.is_active {
            let (first, second) = self.alchemist.preset_values;
            smallvec![first, second]
        } else {
            smallvec![self.roll_die(), self.roll_die()]
        };
        if self.third_die_enabled {
            values.push(self.roll_die());
        }
        values
    }

    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }

    /// Records one roll. In order: snapshot the undo fields, wrap a full
    /// pirate counter and bump it on an event-die pirate face, stamp the
    /// `DiceRoll` (acting player's name, pre-advance round, post-bump pirate
    /// count), prepend it to the session history and to the open game, then
    /// spend the alchemist if it was armed. Turn advancement is the caller's
    /// separate `next_turn` call.
    pub fn add_roll(&mut self, values: DiceValues) -> Result<RollOutcome, GameError> {
        Self::validate_values(&values)?;

        self.previous_state = Some(UndoSnapshot {
            current_player_index: self.current_player_index,
            round: self.round,
            roll_history: self.roll_history.clone(),
            pirate_count: self.pirate_count,
        });

        if self.third_die_enabled {
            if self.pirate_count >= PIRATE_ATTACK_THRESHOLD {
                self.pirate_count = 0;
            }
            if values.get(2).is_some_and(|&face| face > 3) {
                self.pirate_count += 1;
            }
        }

        let player = self
            .current_player()
            .map(|player| player.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        let roll = DiceRoll {
            id: Uuid::new_v4(),
            timestamp: now_millis(),
            values,
            player,
            round: self.round,
            pirate_count: self.pirate_count,
        };

        self.roll_history.insert(0, roll.clone());
        if let Some(game) = self.current_game.as_mut() {
            game.rolls.insert(0, roll.clone());
        }

        let mut events = Vec::new();
        if self.alchemist.is_active {
            self.alchemist = AlchemistState::default();
            events.push(RollEvent::AlchemistConsumed);
        }
        if is_robber_event(&roll.values) {
            events.push(RollEvent::Robber);
        }
        if self.third_die_enabled {
            if let Some(color) = roll.event_die().and_then(CityColor::from_face) {
                events.push(RollEvent::CityGate(color));
            }
            if self.pirate_count >= PIRATE_ATTACK_THRESHOLD {
                events.push(RollEvent::PirateAttack);
            }
        }

        Ok(RollOutcome { roll, events })
    }

    fn validate_values(values: &[u8]) -> Result<(), GameError> {
        if !(2..=3).contains(&values.len()) {
            return Err(GameError::WrongDiceCount(values.len()));
        }
        if let Some(&face) = values.iter().find(|&&face| !(1..=6).contains(&face)) {
            return Err(GameError::DieOutOfRange(face));
        }
        Ok(())
    }

    /// Restores the four snapshot fields and clears the slot; a second undo
    /// in a row is a no-op. The open game's roll list and a spent alchemist
    /// are intentionally left alone.
    pub fn undo_last_roll(&mut self) {
        let Some(snapshot) = self.previous_state.take() else {
            return;
        };
        self.current_player_index = snapshot.current_player_index;
        self.round = snapshot.round;
        self.roll_history = snapshot.roll_history;
        self.pirate_count = snapshot.pirate_count;
    }

    pub fn has_undo(&self) -> bool {
        self.previous_state.is_some()
    }

    /// Arms the one-shot override for the next roll only.
    pub fn set_alchemist(
        &mut self,
        preset_values: (u8, u8),
        highlight_second: bool,
    ) -> Result<(), GameError> {
        for face in [preset_values.0, preset_values.1] {
            if !(1..=6).contains(&face) {
                return Err(GameError::DieOutOfRange(face));
            }
        }
        self.alchemist = AlchemistState {
            is_active: true,
            preset_values,
            highlight_second_die: highlight_second,
        };
        Ok(())
    }

    pub fn clear_alchemist(&mut self) {
        self.alchemist = AlchemistState::default();
    }

    /// Percentage of the way to a pirate attack, in [0, 100].
    pub fn pirate_progress(&self) -> f64 {
        f64::from(self.pirate_count) / f64::from(PIRATE_ATTACK_THRESHOLD) * 100.0
    }

    pub fn reset_pirate_count(&mut self) {
        self.pirate_count = 0;
    }

    /// Empties the session history only; completed games and the open game's
    /// own roll list are untouched.
    pub fn clear_history(&mut self) {
        self.roll_history.clear();
    }
}
