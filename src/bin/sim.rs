use std::path::PathBuf;

use clap::Parser;
use rollatron_rs::cli::SessionStats;
use rollatron_rs::game::stats::most_common_sum;
use rollatron_rs::game::{GameConfig, GameState, RollEvent};
use rollatron_rs::types::CityColor;

#[derive(Debug, Parser)]
#[command(name = "rollatron-sim")]
#[command(about = "Dice simulator - batch-roll a table and summarize the distribution")]
struct Args {
    /// Number of rolls
    #[arg(short = 'n', long, default_value_t = 1000)]
    num: u32,

    /// Comma-separated player names in seating order
    #[arg(long, default_value = "Alice,Bob,Carol")]
    players: String,

    /// Enable the Cities & Knights event die
    #[arg(long)]
    cities_knights: bool,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write the session roll history to a JSON file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Only print the final summary
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    let names: Vec<String> = args
        .players
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        eprintln!("Error: at least one player name is required");
        std::process::exit(1);
    }

    let mut state = GameState::new(GameConfig {
        seed: Some(args.seed),
    });
    if args.cities_knights {
        state.toggle_third_die();
    }
    state.start_new_game(names);

    let mut stats = SessionStats::new();
    for _ in 0..args.num {
        let values = state.roll_values();
        let outcome = match state.add_roll(values) {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("roll rejected: {err}");
                break;
            }
        };
        if !args.quiet {
            for event in &outcome.events {
                match event {
                    RollEvent::Robber => println!(
                        "roll {:>5}: robber ({} rolled {})",
                        stats.rolls + 1,
                        outcome.roll.player,
                        outcome.roll.resource_sum()
                    ),
                    RollEvent::PirateAttack => {
                        println!("roll {:>5}: pirate attack!", stats.rolls + 1)
                    }
                    RollEvent::CityGate(color) => {
                        println!("roll {:>5}: city gate {color}", stats.rolls + 1)
                    }
                    RollEvent::AlchemistConsumed => {}
                }
            }
        }
        stats.record(&outcome);
        if let Err(err) = state.next_turn() {
            eprintln!("cannot advance turn: {err}");
            break;
        }
    }

    print_summary(&stats, &state);

    if let Some(path) = args.export {
        match serde_json::to_string_pretty(&state.roll_history) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&path, json) {
                    eprintln!("Error: cannot write {}: {err}", path.display());
                    std::process::exit(1);
                }
                println!("\nExported {} rolls to {}", state.roll_history.len(), path.display());
            }
            Err(err) => {
                eprintln!("Error: cannot serialize roll history: {err}");
                std::process::exit(1);
            }
        }
    }
}

fn print_summary(stats: &SessionStats, state: &GameState) {
    println!("\n{}", "=".repeat(60));
    println!("ROLL SUMMARY");
    println!("{}", "=".repeat(60));

    let max = stats.sum_counts.iter().copied().max().unwrap_or(0).max(1);
    for (offset, &count) in stats.sum_counts.iter().enumerate() {
        let sum = offset + 2;
        let bar_len = (count * 40 / max) as usize;
        println!("{:>3} | {:<40} {}", sum, "#".repeat(bar_len), count);
    }

    println!("\nRolls: {}", stats.rolls);
    println!(
        "Robber events: {} ({:.1}%)",
        stats.robber_events,
        stats.robber_rate() * 100.0
    );
    if state.third_die_enabled {
        println!("Pirate attacks: {}", stats.pirate_attacks);
        for color in CityColor::ALL {
            let count = stats.city_gates.get(&color).copied().unwrap_or(0);
            println!("City gate {color}: {count}");
        }
    }
    if let Some(sum) = most_common_sum(&state.roll_history) {
        println!("Most common sum: {sum}");
    }
    println!("Rounds played: {}", state.round);
}
