//! Per-level step counter and elapsed-time clock.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Session {
    steps: u32,
    started: Instant,
}

impl Session {
    pub fn new() -> Session {
        Session { steps: 0, started: Instant::now() }
    }

    /// Called at the start of every level attempt: new game, level
    /// advance, replay.
    pub fn reset(&mut self) {
        self.steps = 0;
        self.started = Instant::now();
    }

    /// Called exactly once per move that changed the player's cell.
    pub fn bump_step(&mut self) {
        self.steps += 1;
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

/// Formats a duration as `MM:SS` for the HUD and score records.
pub fn format_mmss(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}
