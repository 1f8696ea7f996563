use std::cmp::Reverse;

use itertools::Itertools;

use crate::game::roll::{DiceRoll, PIRATE_ATTACK_THRESHOLD};

/// Two-dice sums span 2..=12.
pub const HISTOGRAM_BINS: usize = 11;

/// Counts of resource-dice sums, indexed by `sum - 2`. The event die, when
/// present, is excluded.
pub fn roll_sum_histogram(rolls: &[DiceRoll]) -> [u32; HISTOGRAM_BINS] {
    let mut histogram = [0u32; HISTOGRAM_BINS];
    for roll in rolls {
        let sum = roll.resource_sum();
        if (2..=12).contains(&sum) {
            histogram[usize::from(sum - 2)] += 1;
        }
    }
    histogram
}

/// The robber moves when the two resource dice sum to 7. A third value, if
/// present, is ignored.
pub fn is_robber_event(values: &[u8]) -> bool {
    values.len() >= 2 && values[0] + values[1] == 7
}

pub fn is_pirate_attack(pirate_count: u8) -> bool {
    pirate_count >= PIRATE_ATTACK_THRESHOLD
}

/// Most-rolled resource sum over a history; ties break toward the lower sum.
pub fn most_common_sum(rolls: &[DiceRoll]) -> Option<u8> {
    rolls
        .iter()
        .map(|roll| roll.resource_sum())
        .counts()
        .into_iter()
        .max_by_key(|&(sum, count)| (count, Reverse(sum)))
        .map(|(sum, _)| sum)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn roll_of(values: &[u8]) -> DiceRoll {
        DiceRoll {
            id: Uuid::new_v4(),
            timestamp: 0,
            values: values.iter().copied().collect(),
            player: "Test".to_string(),
            round: 1,
            pirate_count: 0,
        }
    }

    #[test]
    fn histogram_buckets_by_sum() {
        let rolls = vec![roll_of(&[3, 4]), roll_of(&[1, 1]), roll_of(&[6, 6])];
        let histogram = roll_sum_histogram(&rolls);
        let mut expected = [0u32; HISTOGRAM_BINS];
        expected[5] = 1; // 3+4
        expected[0] = 1; // 1+1
        expected[10] = 1; // 6+6
        assert_eq!(histogram, expected);
    }

    #[test]
    fn histogram_ignores_event_die() {
        let rolls = vec![roll_of(&[2, 3, 6])];
        let histogram = roll_sum_histogram(&rolls);
        assert_eq!(histogram[3], 1); // bucket for 5
        assert_eq!(histogram.iter().sum::<u32>(), 1);
    }

    #[test]
    fn robber_event_is_sum_seven() {
        assert!(is_robber_event(&[4, 3]));
        assert!(is_robber_event(&[4, 3, 5]));
        assert!(!is_robber_event(&[5, 1]));
        assert!(!is_robber_event(&[7]));
    }

    #[test]
    fn pirate_attack_at_threshold() {
        assert!(!is_pirate_attack(7));
        assert!(is_pirate_attack(8));
    }

    #[test]
    fn most_common_sum_breaks_ties_low() {
        let rolls = vec![roll_of(&[1, 1]), roll_of(&[6, 6]), roll_of(&[3, 4])];
        assert_eq!(most_common_sum(&rolls), Some(2));
        assert_eq!(most_common_sum(&[]), None);

        let rolls = vec![roll_of(&[3, 4]), roll_of(&[3, 4]), roll_of(&[2, 2])];
        assert_eq!(most_common_sum(&rolls), Some(7));
    }
}
