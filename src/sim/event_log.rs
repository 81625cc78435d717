//! Kernel log: a short, capped feed of human-readable notifications
//!
//! Entries are kept oldest-first. Appending past LOG_CAPACITY drops the oldest.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::LOG_CAPACITY;

/// Produces the wall-clock string stamped on each entry
pub type Timestamper = fn() -> String;

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Boot,
    Pickup,
    Damage,
}

impl LogKind {
    pub fn message(self) -> &'static str {
        match self {
            LogKind::Boot => "SYSTEM_BOOT: Scanning for data fragments...",
            LogKind::Pickup => "DATA_NODE_SECURED (+100)",
            LogKind::Damage => "WARNING: EXTERNAL INTERFERENCE DETECTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub kind: LogKind,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    next_id: u64,
}

impl EventLog {
    pub fn push(&mut self, kind: LogKind, timestamp: String) {
        self.next_id += 1;
        self.entries.push_back(LogEntry {
            id: self.next_id,
            kind,
            message: kind.message().to_string(),
            timestamp,
        });
        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Oldest first
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Newest first, the order the log panel shows them in
    pub fn newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Locale tag that makes `Intl` pick the browser's own locale
#[cfg(target_arch = "wasm32")]
const BROWSER_LOCALE: &str = "default";

/// Local time of day in the user's locale, e.g. "3:07:42 PM" or "15:07:42"
#[cfg(target_arch = "wasm32")]
pub fn local_time() -> String {
    js_sys::Date::new_0()
        .to_locale_time_string(BROWSER_LOCALE)
        .into()
}

/// Local time of day in the locale's time representation (`%X`)
#[cfg(not(target_arch = "wasm32"))]
pub fn local_time() -> String {
    chrono::Local::now().format(LOCALE_TIME_FORMAT).to_string()
}

#[cfg(not(target_arch = "wasm32"))]
const LOCALE_TIME_FORMAT: &str = "%X";
