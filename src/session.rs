//! Simulation session
//!
//! Owns the one `GameState` of a run. The view and keyboard layers never touch
//! that state directly: key events only update the input sampler, which the
//! next tick drains. Everything the view shows is read back through
//! `snapshot` and `hud`.

use crate::hud::HudView;
use crate::renderer::FrameSnapshot;
use crate::sim::{GameState, InputSampler, TickReport, tick};

#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    input: InputSampler,
    /// Last player-to-node distance reported by a tick
    distance: Option<f32>,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        log::info!("Session started with seed {}", seed);
        Self::from_state(GameState::new(seed))
    }

    /// Wrap an existing state (custom clocks, scripted scenarios)
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            input: InputSampler::default(),
            distance: None,
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Drain pending input and run one tick
    pub fn advance(&mut self) -> TickReport {
        let input = self.input.sample();
        let report = tick(&mut self.state, &input);
        if report.distance.is_some() {
            self.distance = report.distance;
        }
        report
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Latest proximity reading, None before the first tick
    pub fn distance(&self) -> Option<f32> {
        self.distance
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Frozen per-frame data for the renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state)
    }

    /// Display values for the HUD and log panel
    pub fn hud(&self) -> HudView {
        HudView::new(&self.state, self.distance)
    }

    /// Throw the whole run away and boot a fresh one
    pub fn restart(&mut self, seed: u64) {
        log::info!("Session restarted with seed {}", seed);
        let timestamper = self.state.timestamper;
        *self = Self::from_state(GameState::with_timestamper(seed, timestamper));
    }

    /// Forget held keys and any queued pulse (window lost focus)
    pub fn release_keys(&mut self) {
        log::debug!("Releasing held keys");
        self.input.clear();
    }

    /// Drop transient key state when the view goes away
    pub fn teardown(&mut self) {
        log::info!("Session torn down after {} ticks", self.state.time_ticks);
        self.release_keys();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::GameEvent;
    use glam::Vec2;

    #[test]
    fn test_keys_flow_through_ticks() {
        let mut session = Session::new(3);
        session.key_down("D");
        session.advance();
        session.advance();
        session.key_up("d");
        session.advance();
        let x = session.state().player.pos.x;
        assert!((x - (7.0 + 2.0 * PLAYER_SPEED)).abs() < 1e-5);
    }

    #[test]
    fn test_held_sonar_key_fires_once() {
        let mut session = Session::new(3);
        session.key_down(" ");
        let first = session.advance();
        session.key_down(" ");
        let second = session.advance();
        let fired = |r: &TickReport| {
            r.events
                .iter()
                .any(|e| matches!(e, GameEvent::PulseFired { .. }))
        };
        assert!(fired(&first));
        assert!(!fired(&second));
    }

    #[test]
    fn test_distance_scenario() {
        let mut session = Session::new(3);
        assert_eq!(session.distance(), None);
        session.advance();
        let d = session.distance().unwrap_or_default();
        assert!((d - 5.657).abs() < 1e-3);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = Session::new(3);
        session.key_down("s");
        for _ in 0..30 {
            session.advance();
        }
        session.restart(4);
        let state = session.state();
        assert_eq!(state.player.pos, Vec2::new(7.0, 7.0));
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.log.len(), 1);
        assert_eq!(session.distance(), None);

        // held key from the previous run must not leak
        session.advance();
        assert_eq!(session.state().player.pos, Vec2::new(7.0, 7.0));
    }

    #[test]
    fn test_focus_loss_releases_held_keys() {
        let mut session = Session::new(3);
        session.key_down("ArrowLeft");
        session.advance();
        let x = session.state().player.pos.x;

        // keyup never arrives once the window has lost focus
        session.release_keys();
        session.advance();
        session.advance();
        assert_eq!(session.state().player.pos.x, x);

        // pressing again after refocus works as normal
        session.key_down("ArrowLeft");
        session.advance();
        assert!(session.state().player.pos.x < x);
    }

    #[test]
    fn test_teardown_releases_keys() {
        let mut session = Session::new(3);
        session.key_down("a");
        session.teardown();
        session.advance();
        assert_eq!(session.state().player.pos, Vec2::new(7.0, 7.0));
    }
}
