//! Arrow key state for `IsKeyPressed`
//!
//! Terminals only report key releases when the keyboard enhancement protocol
//! is available. Without it a key is considered held for [`HOLD_WINDOW`] after
//! its last press or auto-repeat, which is long enough to bridge the initial
//! repeat delay of most keyboards.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use hotscript_events::{KeyEventKind, KeyboardEvent};
use hotscript_scripting_host::ArrowKey;

use crate::keyboard::arrow_key;

pub const HOLD_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct HeldKeys {
    release_events: bool,
    last_seen: HashMap<ArrowKey, Instant>,
}

impl HeldKeys {
    /// `release_events` says whether the terminal reports key releases
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            last_seen: HashMap::new(),
        }
    }

    pub fn apply(&mut self, event: &KeyboardEvent, now: Instant) {
        let Some(key) = arrow_key(event.key) else {
            return;
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(key, now);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&key);
            }
        }
    }

    pub fn is_held(&self, key: ArrowKey, now: Instant) -> bool {
        match self.last_seen.get(&key) {
            Some(_) if self.release_events => true,
            Some(seen) => now.saturating_duration_since(*seen) < HOLD_WINDOW,
            None => false,
        }
    }

    /// Forget every held key, e.g. when focus is lost and releases won't arrive
    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}
