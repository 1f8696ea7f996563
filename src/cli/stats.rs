use std::collections::HashMap;

use crate::game::stats::HISTOGRAM_BINS;
use crate::game::{RollEvent, RollOutcome};
use crate::types::CityColor;

/// Running tallies over a batch of roll outcomes, for the sim binary's
/// summary output.
#[derive(Debug, Default, Clone)]
pub struct SessionStats {
    pub rolls: u64,
    pub robber_events: u64,
    pub pirate_attacks: u64,
    pub city_gates: HashMap<CityColor, u64>,
    pub sum_counts: [u64; HISTOGRAM_BINS],
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &RollOutcome) {
        self.rolls += 1;
        let sum = outcome.roll.resource_sum();
        if (2..=12).contains(&sum) {
            self.sum_counts[usize::from(sum - 2)] += 1;
        }
        for event in &outcome.events {
            match event {
                RollEvent::Robber => self.robber_events += 1,
                RollEvent::PirateAttack => self.pirate_attacks += 1,
                RollEvent::CityGate(color) => {
                    *self.city_gates.entry(*color).or_insert(0) += 1;
                }
                RollEvent::AlchemistConsumed => {}
            }
        }
    }

    pub fn robber_rate(&self) -> f64 {
        if self.rolls == 0 {
            return 0.0;
        }
        self.robber_events as f64 / self.rolls as f64
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::game::DiceRoll;

    fn outcome(values: &[u8], events: Vec<RollEvent>) -> RollOutcome {
        RollOutcome {
            roll: DiceRoll {
                id: Uuid::new_v4(),
                timestamp: 0,
                values: values.iter().copied().collect(),
                player: "Test".to_string(),
                round: 1,
                pirate_count: 0,
            },
            events,
        }
    }

    #[test]
    fn tallies_rolls_and_events() {
        let mut stats = SessionStats::new();
        stats.record(&outcome(&[3, 4], vec![RollEvent::Robber]));
        stats.record(&outcome(
            &[2, 2, 6],
            vec![RollEvent::PirateAttack],
        ));
        stats.record(&outcome(
            &[1, 1, 2],
            vec![RollEvent::CityGate(CityColor::Green)],
        ));

        assert_eq!(stats.rolls, 3);
        assert_eq!(stats.robber_events, 1);
        assert_eq!(stats.pirate_attacks, 1);
        assert_eq!(stats.city_gates.get(&CityColor::Green), Some(&1));
        assert_eq!(stats.sum_counts[5], 1); // 7
        assert_eq!(stats.sum_counts[2], 1); // 4
        assert_eq!(stats.sum_counts[0], 1); // 2
        assert!((stats.robber_rate() - 1.0 / 3.0).abs() < 1e-9);
    }
}
