//! Rendering boundary
//!
//! The simulation never draws. Once per tick it hands a `FrameSnapshot` to a
//! `Renderer`, which turns grid positions into pixels with `CELL_SIZE`.

pub mod ascii;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use ascii::AsciiRenderer;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use serde::Serialize;

use crate::consts::{CELL_SIZE, ENEMY_HIGHLIGHT_RANGE};
use crate::sim::{Enemy, GameState, Player, SonarPulse, Target};

/// Ring radius below which the sonar is not drawn
pub const RING_VISIBLE_RADIUS: f32 = 5.0;

/// Draws one frame
pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot);
}

/// Everything needed to draw a frame, copied out of the simulation
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub player: Player,
    pub target: Target,
    pub enemies: Vec<Enemy>,
    pub sonar: Option<SonarPulse>,
    /// Pixels per grid unit
    pub cell_size: f32,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            player: state.player.clone(),
            target: state.target.clone(),
            enemies: state.enemies.as_slice().to_vec(),
            sonar: state.sonar.pulse().copied(),
            cell_size: CELL_SIZE,
        }
    }

    /// Enemies this close to the player are drawn at full intensity
    pub fn is_enemy_near(&self, enemy: &Enemy) -> bool {
        crate::distance(enemy.pos, self.player.pos) < ENEMY_HIGHLIGHT_RANGE
    }

    /// The ring, once it is large enough to draw
    pub fn visible_ring(&self) -> Option<&SonarPulse> {
        self.sonar
            .as_ref()
            .filter(|p| p.radius > RING_VISIBLE_RADIUS)
    }
}
