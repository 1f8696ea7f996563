pub mod game;
pub mod players;
pub mod roll;
pub mod state;
pub mod stats;

pub use game::Game;
pub use players::{Player, roster_from_names};
pub use roll::{AlchemistState, DiceRoll, DiceValues, PIRATE_ATTACK_THRESHOLD};
pub use state::{GameConfig, GameError, GameState, RollEvent, RollOutcome};
pub use stats::{
    HISTOGRAM_BINS, is_pirate_attack, is_robber_event, most_common_sum, roll_sum_histogram,
};
