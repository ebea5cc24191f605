//! Input debouncing for the search box.

use std::time::{Duration, Instant};

/// Holds the latest input until it has been stable for `interval`.
#[derive(Debug)]
pub struct Debouncer {
    interval: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// Records a new value and restarts the quiet interval.
    pub fn input(&mut self, value: String, now: Instant) {
        let deadline = now.checked_add(self.interval).unwrap_or(now);
        self.pending = Some((value, deadline));
    }

    /// Returns the pending value once its deadline has passed. Each value is
    /// returned at most once.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drops any pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns `true` while a value is waiting for its deadline.
    #[cfg(test)]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
