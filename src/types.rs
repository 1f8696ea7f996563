use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// City-gate color carried by event-die faces 1-3. Faces 4-6 carry no color;
/// they count toward a pirate attack instead.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CityColor {
    Yellow,
    Green,
    Blue,
}

impl CityColor {
    pub const ALL: [CityColor; 3] = [CityColor::Yellow, CityColor::Green, CityColor::Blue];

    /// Maps an event-die face to its city-gate color. Faces above 3 are
    /// pirate faces and map to `None`.
    pub fn from_face(face: u8) -> Option<CityColor> {
        match face {
            1 => Some(CityColor::Yellow),
            2 => Some(CityColor::Green),
            3 => Some(CityColor::Blue),
            _ => None,
        }
    }

    /// Hex color used by the presentation layer.
    pub fn hex(&self) -> &'static str {
        match self {
            CityColor::Yellow => "#eab308",
            CityColor::Green => "#22c55e",
            CityColor::Blue => "#3b82f6",
        }
    }
}
