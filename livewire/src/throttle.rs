//! Time-based rate limiter with explicit clock input.
//!
//! Calls inside the interval coalesce to the latest value, which is released
//! by the first `poll` after the interval has elapsed.

use std::time::Duration;
use web_time::Instant;

#[derive(Clone, Debug)]
pub struct Throttle<T> {
    interval: Duration,
    window_start: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Throttle {
            interval,
            window_start: None,
            pending: None,
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    fn ready(&self, now: Instant) -> bool {
        match self.window_start {
            None => true,
            Some(start) => now.saturating_duration_since(start) >= self.interval,
        }
    }

    /// Offer a value. It is held for `poll`; a later call replaces it.
    pub fn call(&mut self, now: Instant, value: T) {
        self.pending = Some(value);
        if self.window_start.is_none() {
            self.window_start = Some(now);
        }
    }

    /// Release the held value once the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_some() && self.ready(now) {
            self.window_start = Some(now);
            return self.pending.take();
        }
        None
    }
}
