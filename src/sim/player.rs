//! Player controller: keyboard-driven movement inside the grid

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::target::Target;
use super::tick::TickInput;
use crate::clamp_to_grid;
use crate::consts::*;

/// The player's probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Grid position (continuous)
    pub pos: Vec2,
    /// Remaining lives; the run ends at 0
    pub lives: u8,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START.0, PLAYER_START.1),
            lives: PLAYER_LIVES,
        }
    }
}

/// Where the player stands relative to the data node after moving
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    pub distance: f32,
    pub picked_up: bool,
}

impl Player {
    /// Per-tick velocity from held movement keys.
    ///
    /// Each held axis contributes PLAYER_SPEED. Two axes give a diagonal of
    /// length sqrt(2) * PLAYER_SPEED; opposite keys cancel out.
    pub fn velocity(input: &TickInput) -> Vec2 {
        let mut vel = Vec2::ZERO;
        if input.up {
            vel.y -= PLAYER_SPEED;
        }
        if input.down {
            vel.y += PLAYER_SPEED;
        }
        if input.left {
            vel.x -= PLAYER_SPEED;
        }
        if input.right {
            vel.x += PLAYER_SPEED;
        }
        vel
    }

    /// Integrate one tick of movement, clamped to the arena
    pub fn step(&mut self, vel: Vec2) {
        self.pos = clamp_to_grid(self.pos + vel);
    }

    /// Distance to the node and whether it is close enough to collect
    pub fn proximity(&self, target: &Target) -> Proximity {
        let distance = crate::distance(self.pos, target.pos);
        Proximity {
            distance,
            picked_up: distance < PICKUP_RADIUS,
        }
    }

    /// Lose one life (never below zero). Returns lives left.
    pub fn take_hit(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(up: bool, down: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            up,
            down,
            left,
            right,
            ..Default::default()
        }
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let vel = Player::velocity(&input(true, false, false, true));
        assert!((vel.length() - PLAYER_SPEED * 2.0_f32.sqrt()).abs() < 1e-6);
        assert!(vel.x > 0.0 && vel.y < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let vel = Player::velocity(&input(true, true, true, true));
        assert_eq!(vel, Vec2::ZERO);
    }

    #[test]
    fn test_step_clamps_at_corner() {
        let mut player = Player {
            pos: Vec2::new(0.05, GRID_MAX - 0.05),
            lives: 3,
        };
        player.step(Player::velocity(&input(false, true, true, false)));
        assert_eq!(player.pos, Vec2::new(0.0, GRID_MAX));
    }

    #[test]
    fn test_proximity_start_positions() {
        let player = Player::default();
        let target = Target::new(1, Vec2::new(3.0, 3.0));
        let prox = player.proximity(&target);
        assert!((prox.distance - 32.0_f32.sqrt()).abs() < 1e-4);
        assert!(!prox.picked_up);
    }

    #[test]
    fn test_take_hit_floors_at_zero() {
        let mut player = Player {
            pos: Vec2::ZERO,
            lives: 1,
        };
        assert_eq!(player.take_hit(), 0);
        assert_eq!(player.take_hit(), 0);
        assert!(!player.is_alive());
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_grid(
            keys in proptest::collection::vec(any::<(bool, bool, bool, bool)>(), 1..400),
        ) {
            let mut player = Player::default();
            for (up, down, left, right) in keys {
                player.step(Player::velocity(&input(up, down, left, right)));
                prop_assert!((0.0..=GRID_MAX).contains(&player.pos.x));
                prop_assert!((0.0..=GRID_MAX).contains(&player.pos.y));
            }
        }
    }
}
