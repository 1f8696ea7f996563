use clap::Parser;
use rollatron_rs::cli::TuiApp;
use rollatron_rs::game::{GameConfig, GameState};

#[derive(Debug, Parser)]
#[command(name = "rollatron")]
#[command(about = "Catan dice table - digital dice with roll history and stats")]
struct Args {
    /// Comma-separated player names in seating order
    #[arg(long, default_value = "Alice,Bob")]
    players: String,

    /// Enable the Cities & Knights event die
    #[arg(long)]
    cities_knights: bool,

    /// Random seed for reproducible dice (omit for entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,
}

fn main() -> std::io::Result<()> {
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

    let mut state = GameState::new(GameConfig { seed: args.seed });
    if args.cities_knights {
        state.toggle_third_die();
    }
    state.start_new_game(names.clone());

    TuiApp::new(state, names, args.dark).run()
}
