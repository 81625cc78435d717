//! Data node (the collectible) placement and visibility

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::EntityId;
use crate::consts::GRID_SIZE;
use crate::grid_to_pixel;

/// The single live data node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: EntityId,
    pub pos: Vec2,
    /// Set by a passing sonar ring, cleared by the next pulse or a respawn
    pub revealed: bool,
}

impl Target {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            revealed: false,
        }
    }

    /// Replace this node with a fresh hidden one at a random inner cell
    pub fn respawn<R: Rng>(&mut self, id: EntityId, rng: &mut R) {
        self.id = id;
        self.pos = random_inner_cell(rng);
        self.revealed = false;
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn clear_reveal(&mut self) {
        self.revealed = false;
    }

    /// Pixel position of the node's cell center
    pub fn pixel_pos(&self) -> Vec2 {
        grid_to_pixel(self.pos)
    }
}

/// Uniform integer cell with both coordinates in [1, GRID_SIZE - 2]
pub fn random_inner_cell<R: Rng>(rng: &mut R) -> Vec2 {
    let x = rng.random_range(1..=GRID_SIZE - 2);
    let y = rng.random_range(1..=GRID_SIZE - 2);
    Vec2::new(x as f32, y as f32)
}
