use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

/// Event-die hits needed before the pirates attack. The counter wraps to 0
/// and restarts once it reaches this value.
pub const PIRATE_ATTACK_THRESHOLD: u8 = 8;

/// Two resource dice plus an optional event die, in that order.
pub type DiceValues = SmallVec<[u8; 3]>;

/// One roll event. Immutable once created; `player`, `round` and
/// `pirate_count` are snapshots of the table at roll time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub id: Uuid,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub values: DiceValues,
    pub player: String,
    pub round: u32,
    pub pirate_count: u8,
}

impl DiceRoll {
    /// Sum of the two resource dice. The event die never counts here.
    pub fn resource_sum(&self) -> u8 {
        self.values[0] + self.values[1]
    }

    pub fn event_die(&self) -> Option<u8> {
        self.values.get(2).copied()
    }
}

/// One-shot override pinning the next roll's resource dice. Consumed by
/// exactly one roll, whatever faces come up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlchemistState {
    pub is_active: bool,
    pub preset_values: (u8, u8),
    pub highlight_second_die: bool,
}

impl Default for AlchemistState {
    fn default() -> Self {
        Self {
            is_active: false,
            preset_values: (1, 1),
            highlight_second_die: false,
        }
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
