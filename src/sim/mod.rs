//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed per-tick speeds
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies (log timestamps come from an injected clock)

pub mod enemy;
pub mod event_log;
pub mod input;
pub mod player;
pub mod score;
pub mod sonar;
pub mod state;
pub mod target;
pub mod tick;

pub use enemy::{Enemy, Swarm};
pub use event_log::{EventLog, LogEntry, LogKind};
pub use input::{Action, Direction, InputSampler};
pub use player::{Player, Proximity};
pub use score::Score;
pub use sonar::{Sonar, SonarPulse, SonarStep};
pub use state::{EntityId, GameEvent, GamePhase, GameState};
pub use target::Target;
pub use tick::{TickInput, TickReport, tick};
