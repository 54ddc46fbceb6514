//! Frame-driven tick scheduling
//!
//! The terminal loop polls the clock once per frame. A tick is due when at
//! least the current tick interval has passed since the previous one, so the
//! frame rate stays fixed while the game speeds up with its level.

use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct Clock {
    armed: bool,
    last_tick: Option<Instant>,
    /// Bumped on every start so stale schedules can be told apart
    epoch: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the clock; the next poll fires immediately
    pub fn start(&mut self) {
        self.armed = true;
        self.last_tick = None;
        self.epoch += 1;
    }

    pub fn stop(&mut self) {
        self.armed = false;
        self.last_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.armed
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Called once per frame; returns true when a tick should run now
    pub fn poll(&mut self, now: Instant, interval: Duration) -> bool {
        if !self.armed {
            return false;
        }
        let due = match self.last_tick {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= interval,
        };
        if due {
            self.last_tick = Some(now);
        }
        due
    }
}
