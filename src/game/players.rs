use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roster entry. Names are free-form and may repeat; the id is what
/// distinguishes two players called "Alice".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Builds a seating-ordered roster from names, each with a fresh id.
pub fn roster_from_names<I, S>(names: I) -> Vec<Player>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Player::new).collect()
}
