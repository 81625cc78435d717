//! Keyboard input sampler
//!
//! Movement keys are level-triggered: a key counts for every tick it is held,
//! and several may combine. The sonar key is edge-triggered: one pulse per
//! physical press, however long it is held or how often the OS repeats it.

use std::collections::BTreeSet;

use super::tick::TickInput;

/// Movement axis direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Key identifiers (lowercase) and the direction each one drives
const MOVE_BINDINGS: [(&str, Direction); 8] = [
    ("w", Direction::Up),
    ("arrowup", Direction::Up),
    ("s", Direction::Down),
    ("arrowdown", Direction::Down),
    ("a", Direction::Left),
    ("arrowleft", Direction::Left),
    ("d", Direction::Right),
    ("arrowright", Direction::Right),
];

/// The sonar key, as reported by `KeyboardEvent.key`
pub const SONAR_KEY: &str = " ";

/// What a recognised key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    FireSonar,
}

/// Bound key name for a raw key identifier, or None if the key is unbound
fn bound_key(key: &str) -> Option<(&'static str, Action)> {
    if key == SONAR_KEY {
        return Some((SONAR_KEY, Action::FireSonar));
    }
    let key = key.to_lowercase();
    MOVE_BINDINGS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|&(name, dir)| (name, Action::Move(dir)))
}

/// Map a raw key identifier to its action (case-insensitive)
pub fn action_for(key: &str) -> Option<Action> {
    bound_key(key).map(|(_, action)| action)
}

/// Pending input intents, written by key events and drained once per tick
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    /// Bound movement keys currently down
    held: BTreeSet<&'static str>,
    sonar_down: bool,
    fire_pending: bool,
}

impl InputSampler {
    pub fn key_down(&mut self, key: &str) {
        match bound_key(key) {
            Some((_, Action::FireSonar)) => {
                if !self.sonar_down {
                    self.fire_pending = true;
                }
                self.sonar_down = true;
            }
            Some((name, Action::Move(_))) => {
                self.held.insert(name);
            }
            None => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        match bound_key(key) {
            Some((_, Action::FireSonar)) => self.sonar_down = false,
            Some((name, Action::Move(_))) => {
                self.held.remove(name);
            }
            None => {}
        }
    }

    /// True while any key bound to `dir` is down
    pub fn is_held(&self, dir: Direction) -> bool {
        MOVE_BINDINGS
            .iter()
            .any(|(name, d)| *d == dir && self.held.contains(name))
    }

    /// Snapshot the held keys and consume a pending sonar request
    pub fn sample(&mut self) -> TickInput {
        TickInput {
            up: self.is_held(Direction::Up),
            down: self.is_held(Direction::Down),
            left: self.is_held(Direction::Left),
            right: self.is_held(Direction::Right),
            fire_sonar: std::mem::take(&mut self.fire_pending),
        }
    }

    /// Forget all key state (window blur, teardown, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
