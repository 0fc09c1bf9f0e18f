//! Polled gravity timer for synchronous hosts
//!
//! The host asks [`PollTimer::poll`] with the current time and calls
//! `GameState::on_timer` once per elapsed period. Tests and benches drive
//! the state machine this way without an async runtime.

use std::time::{Duration, Instant};

use crate::surface::GravityTimer;

#[derive(Debug, Clone, Default)]
pub struct PollTimer {
    period: Option<Duration>,
    next_due: Option<Instant>,
    /// Number of `start` calls, including restarts
    starts: u32,
}

impl PollTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// True once per elapsed period while running.
    ///
    /// The first poll after `start` anchors the schedule and fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(period) = self.period else {
            return false;
        };
        match self.next_due {
            Some(due) if now < due => false,
            _ => {
                self.next_due = Some(now + period);
                true
            }
        }
    }
}

impl GravityTimer for PollTimer {
    fn start(&mut self, period: Duration) {
        self.period = Some(period);
        self.next_due = None;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.period = None;
        self.next_due = None;
    }

    fn is_running(&self) -> bool {
        self.period.is_some()
    }
}
