//! Sonar pulse: an expanding ring that uncovers the data node
//!
//! idle -> expanding -> idle. Firing always starts a fresh ring at radius 0,
//! replacing any ring still in flight.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// An expanding ring, in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SonarPulse {
    /// Fixed at the player's pixel position when fired
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
}

impl SonarPulse {
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            radius: 0.0,
            max_radius: SONAR_MAX_RADIUS,
        }
    }

    /// Whether the ring currently covers `point` (pixels)
    pub fn covers(&self, point: Vec2) -> bool {
        crate::distance(self.origin, point) < self.radius.min(self.max_radius)
    }
}

/// Result of advancing the sonar by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SonarStep {
    /// No ring in flight
    Idle,
    /// Ring grew and is still active
    Expanding { covers_target: bool },
    /// Ring grew past its max radius and was discarded this tick
    Expired { covers_target: bool },
}

impl SonarStep {
    pub fn covers_target(self) -> bool {
        match self {
            SonarStep::Idle => false,
            SonarStep::Expanding { covers_target } | SonarStep::Expired { covers_target } => {
                covers_target
            }
        }
    }
}

/// Holds at most one pulse
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sonar {
    pulse: Option<SonarPulse>,
}

impl Sonar {
    /// Start a new ring at `origin`, discarding any active one
    pub fn fire(&mut self, origin: Vec2) {
        self.pulse = Some(SonarPulse::new(origin));
    }

    pub fn pulse(&self) -> Option<&SonarPulse> {
        self.pulse.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.pulse.is_some()
    }

    /// Grow the ring by SONAR_SPEED and test it against the node's pixel position
    pub fn expand(&mut self, target_px: Vec2) -> SonarStep {
        let Some(pulse) = self.pulse.as_mut() else {
            return SonarStep::Idle;
        };

        pulse.radius += SONAR_SPEED;
        let covers_target = pulse.covers(target_px);

        if pulse.radius >= pulse.max_radius {
            self.pulse = None;
            SonarStep::Expired { covers_target }
        } else {
            SonarStep::Expanding { covers_target }
        }
    }
}
