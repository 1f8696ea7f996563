use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::players::Player;
use crate::game::roll::{DiceRoll, now_millis};

/// One tracked game. `end_time == None` while the game is open and receiving
/// rolls; once closed it is append-only history. `rolls` is most-recent-first
/// and is a second copy of the session history for this game's span — neither
/// list is derived from the other (undo only rewinds the session list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    /// Milliseconds since the Unix epoch.
    pub start_time: u64,
    pub end_time: Option<u64>,
    pub rolls: Vec<DiceRoll>,
    /// Seating snapshot taken at game start; later roster edits don't touch it.
    pub players: Vec<Player>,
}

impl Game {
    pub fn open(players: Vec<Player>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time: now_millis(),
            end_time: None,
            rolls: Vec::new(),
            players,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub(crate) fn close(&mut self) {
        self.end_time = Some(now_millis());
    }

    /// Wall-clock length of a closed game; `None` while still open.
    pub fn duration_ms(&self) -> Option<u64> {
        self.end_time
            .map(|end| end.saturating_sub(self.start_time))
    }
}
