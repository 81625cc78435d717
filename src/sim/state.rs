//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; it is mutated only by `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Swarm;
use super::event_log::{EventLog, LogKind, Timestamper, local_time};
use super::player::Player;
use super::score::Score;
use super::sonar::Sonar;
use super::target::Target;
use crate::consts::*;

/// Stable identifier for targets and enemies
pub type EntityId = u32;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks are processed
    Playing,
    /// Lives reached zero; ticks are no-ops until restart
    GameOver,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A sonar ring was started at `origin` (pixels)
    PulseFired { origin: Vec2 },
    /// The player reached the node; `next` is the node that replaced it
    TargetCollected {
        collected: EntityId,
        next: EntityId,
        score: u64,
    },
    /// The score crossed a spawn threshold
    EnemySpawned { enemy: EntityId },
    /// An enemy caught the player and was sent back to the corner
    PlayerHit { enemy: EntityId, lives: u8 },
    /// The active ring passed over the node
    TargetRevealed { target: EntityId },
    /// The ring reached its max radius and was discarded
    PulseExpired,
    /// Lives hit zero
    GameOver { final_score: u64 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Target placement RNG
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub score: Score,
    /// The single live data node
    pub target: Target,
    pub enemies: Swarm,
    pub sonar: Sonar,
    pub log: EventLog,
    /// Wall clock used for log timestamps
    pub timestamper: Timestamper,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a new run with the given seed, stamping log entries with local time
    pub fn new(seed: u64) -> Self {
        Self::with_timestamper(seed, local_time)
    }

    pub fn with_timestamper(seed: u64, timestamper: Timestamper) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            player: Player::default(),
            score: Score::default(),
            target: Target::new(0, Vec2::new(TARGET_START.0, TARGET_START.1)),
            enemies: Swarm::default(),
            sonar: Sonar::default(),
            log: EventLog::default(),
            timestamper,
            next_id: 1,
        };

        state.target.id = state.next_entity_id();
        state.spawn_enemy();
        state.record(LogKind::Boot);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a pursuer at the spawn corner
    pub fn spawn_enemy(&mut self) -> EntityId {
        let id = self.next_entity_id();
        self.enemies.spawn(id);
        id
    }

    /// Append a kernel log entry stamped with the current time
    pub fn record(&mut self, kind: LogKind) {
        self.log.push(kind, (self.timestamper)());
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
