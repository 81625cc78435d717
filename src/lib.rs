//! Invisible Arena - a grid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, pursuit, sonar, pickups)
//! - `scheduler`: Cancellable per-frame tick loop
//! - `session`: Owned simulation context fed by input intents
//! - `renderer`: Frame snapshots and the drawing boundary
//! - `hud`: Display values for the surrounding UI

pub mod demo;
pub mod hud;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod sim;

pub use hud::HudView;
pub use scheduler::{FrameLoop, LoopHandle, LoopStatus};
pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena is GRID_SIZE x GRID_SIZE cells
    pub const GRID_SIZE: u32 = 15;
    /// Largest reachable coordinate on either axis
    pub const GRID_MAX: f32 = (GRID_SIZE - 1) as f32;
    /// Pixels per grid unit
    pub const CELL_SIZE: f32 = 40.0;
    /// Canvas edge length in pixels
    pub const CANVAS_SIZE: f32 = GRID_SIZE as f32 * CELL_SIZE;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (7.0, 7.0);
    pub const PLAYER_LIVES: u8 = 3;
    /// Grid units per tick on each held axis (diagonals are not normalized)
    pub const PLAYER_SPEED: f32 = 0.09;
    /// Player-to-target distance that counts as a pickup
    pub const PICKUP_RADIUS: f32 = 0.6;

    /// Initial data node position
    pub const TARGET_START: (f32, f32) = (3.0, 3.0);

    /// Enemies chase at this many grid units per tick
    pub const ENEMY_SPEED: f32 = 0.022;
    /// Enemy-to-player distance that counts as a hit
    pub const ENEMY_HIT_RADIUS: f32 = 0.45;
    /// Display only: enemies closer than this are drawn at full intensity
    pub const ENEMY_HIGHLIGHT_RANGE: f32 = 2.5;

    /// Sonar ring growth in pixels per tick
    pub const SONAR_SPEED: f32 = 7.0;
    /// Sonar ring is discarded once it reaches this radius (pixels)
    pub const SONAR_MAX_RADIUS: f32 = 380.0;

    /// Points per data node
    pub const PICKUP_SCORE: u64 = 100;
    /// A new pursuer joins whenever the score hits a multiple of this
    pub const ENEMY_SPAWN_EVERY: u64 = 300;

    /// Kernel log keeps this many entries
    pub const LOG_CAPACITY: usize = 8;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle (radians) of the vector pointing from `from` to `to`
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Clamp each axis into the playable range [0, GRID_MAX]
#[inline]
pub fn clamp_to_grid(pos: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, Vec2::splat(consts::GRID_MAX))
}

/// Convert a grid position to the pixel position of its cell center
#[inline]
pub fn grid_to_pixel(pos: Vec2) -> Vec2 {
    pos * consts::CELL_SIZE + Vec2::splat(consts::CELL_SIZE / 2.0)
}
