//! Pursuer swarm
//!
//! Every enemy steers straight at the player each tick. No path planning and
//! no separation between enemies. Enemies are never removed: a hit sends the
//! enemy back to the spawn corner, so the list only grows and indices stay
//! stable for the lifetime of a run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::EntityId;
use crate::bearing;
use crate::consts::*;

/// Where new and recycled enemies appear
pub const SPAWN_CORNER: Vec2 = Vec2::ZERO;

/// A single pursuer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
}

impl Enemy {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            pos: SPAWN_CORNER,
        }
    }

    /// Advance ENEMY_SPEED along the bearing to `goal`.
    /// Returns the remaining distance to `goal`.
    pub fn pursue(&mut self, goal: Vec2) -> f32 {
        let angle = bearing(self.pos, goal);
        self.pos += Vec2::new(angle.cos(), angle.sin()) * ENEMY_SPEED;
        crate::distance(self.pos, goal)
    }

    /// Send the enemy back to the spawn corner
    pub fn recycle(&mut self) {
        self.pos = SPAWN_CORNER;
    }
}

/// Append-only collection of pursuers (sorted by id)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Swarm {
    enemies: Vec<Enemy>,
}

impl Swarm {
    pub fn spawn(&mut self, id: EntityId) {
        self.enemies.push(Enemy::new(id));
    }

    /// Move every enemy toward `player_pos`, recycling the ones that reach it.
    /// Returns the ids of enemies that hit the player this tick, in id order.
    pub fn step(&mut self, player_pos: Vec2) -> Vec<EntityId> {
        let mut hits = Vec::new();
        for enemy in &mut self.enemies {
            if enemy.pursue(player_pos) < ENEMY_HIT_RADIUS {
                enemy.recycle();
                hits.push(enemy.id);
            }
        }
        hits
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn as_slice(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn get(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }
}
