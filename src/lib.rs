#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod cli;
pub mod game;
pub mod theme;
pub mod types;

pub use game::{
    AlchemistState, DiceRoll, DiceValues, Game, GameConfig, GameError, GameState, Player,
    RollEvent, RollOutcome,
};
pub use theme::{Palette, ThemeState};
pub use types::CityColor;
