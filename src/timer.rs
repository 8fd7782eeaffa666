//! Periodic spawn trigger.
//!
//! Polled once per frame from the game loop rather than running on its own
//! thread.  Changing the interval re-arms the timer from that moment.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct SpawnTimer {
    interval: Duration,
    next: Instant,
}

impl SpawnTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True once per elapsed interval.  A loop that fell behind by several
    /// intervals gets a single tick and resumes from `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }

    /// Re-arm with `interval` if it differs from the current one.
    pub fn sync(&mut self, interval: Duration, now: Instant) {
        if interval != self.interval {
            log::debug!("Spawn timer re-armed: {:?}", interval);
            *self = Self::new(interval, now);
        }
    }
}
