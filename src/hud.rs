//! HUD view model
//!
//! Plain values for the header panel, the kernel log and the game-over
//! overlay. Nothing here feeds back into the simulation.

use serde::Serialize;

use crate::sim::{GameState, LogEntry};

/// Below this distance the proximity icon pings
pub const PING_DISTANCE: f32 = 2.0;

#[derive(Debug, Clone, Serialize)]
pub struct HudView {
    pub lives: u8,
    pub score: u64,
    /// Latest player-to-node distance in grid units
    pub distance: Option<f32>,
    /// Kernel log, newest first
    pub log: Vec<LogEntry>,
    pub game_over: bool,
}

impl HudView {
    pub fn new(state: &GameState, distance: Option<f32>) -> Self {
        Self {
            lives: state.player.lives,
            score: state.score.value(),
            distance,
            log: state.log.newest_first().cloned().collect(),
            game_over: state.is_over(),
        }
    }

    /// Proximity sensor readout, ten meters per grid unit: "57m".
    /// Halves round away from zero.
    pub fn proximity_label(&self) -> String {
        match self.distance {
            Some(d) => format!("{}m", (d * 10.0).round()),
            None => "0m".to_string(),
        }
    }

    pub fn proximity_ping(&self) -> bool {
        self.distance.is_some_and(|d| d < PING_DISTANCE)
    }

    /// One heart per life, or the halted banner
    pub fn integrity_label(&self) -> String {
        if self.lives > 0 {
            "\u{2665}".repeat(self.lives as usize)
        } else {
            "SYSTEM HALTED".to_string()
        }
    }

    /// Game-over overlay text
    pub fn final_message(&self) -> Option<String> {
        self.game_over.then(|| {
            format!(
                "CONNECTION LOST. Data collection interrupted. Final archive score: {}",
                self.score
            )
        })
    }
}
