//! Idle/demo autopilot
//!
//! Plays through the same keyboard path a human uses: pings the sonar while
//! the node is hidden, then walks toward it once revealed.

use crate::session::Session;

/// Closer than this on an axis and the autopilot stops pushing that way
const AXIS_DEADZONE: f32 = 0.05;

#[derive(Debug, Default)]
pub struct Autopilot {
    held: Vec<&'static str>,
    sonar_down: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue this frame's key events
    pub fn drive(&mut self, session: &mut Session) {
        if self.sonar_down {
            session.key_up(" ");
            self.sonar_down = false;
        }

        let state = session.state();
        let wanted = if state.target.revealed {
            let delta = state.target.pos - state.player.pos;
            let mut keys = Vec::with_capacity(2);
            if delta.x > AXIS_DEADZONE {
                keys.push("d");
            } else if delta.x < -AXIS_DEADZONE {
                keys.push("a");
            }
            if delta.y > AXIS_DEADZONE {
                keys.push("s");
            } else if delta.y < -AXIS_DEADZONE {
                keys.push("w");
            }
            keys
        } else {
            Vec::new()
        };
        let ping = !state.target.revealed && !state.sonar.is_active();

        for key in self.held.iter().filter(|k| !wanted.contains(*k)) {
            session.key_up(key);
        }
        for key in wanted.iter().filter(|k| !self.held.contains(*k)) {
            session.key_down(key);
        }
        self.held = wanted;

        if ping {
            session.key_down(" ");
            self.sonar_down = true;
        }
    }
}
