pub mod dice_display;
pub mod stats;
pub mod tui;

pub use stats::SessionStats;
pub use tui::TuiApp;
