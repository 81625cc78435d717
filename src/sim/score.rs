//! Score counter

use serde::{Deserialize, Serialize};

use crate::consts::{ENEMY_SPAWN_EVERY, PICKUP_SCORE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score(u64);

impl Score {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Add one pickup's worth of points and return the new total
    pub fn award(&mut self) -> u64 {
        self.0 += PICKUP_SCORE;
        self.0
    }

    /// A fresh pursuer joins whenever the total lands on a multiple of ENEMY_SPAWN_EVERY
    pub fn spawns_enemy(total: u64) -> bool {
        total > 0 && total % ENEMY_SPAWN_EVERY == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_every_third_pickup_spawns() {
        let mut score = Score::default();
        let spawns: Vec<bool> = (0..9).map(|_| Score::spawns_enemy(score.award())).collect();
        assert_eq!(
            spawns,
            vec![false, false, true, false, false, true, false, false, true]
        );
        assert_eq!(score.value(), 900);
    }

    proptest! {
        #[test]
        fn prop_score_is_linear_in_pickups(k in 1u64..500) {
            let mut score = Score::default();
            let mut last = 0;
            for _ in 0..k {
                last = score.award();
            }
            prop_assert_eq!(last, 100 * k);
            prop_assert_eq!(Score::spawns_enemy(last), k % 3 == 0);
        }
    }
}
