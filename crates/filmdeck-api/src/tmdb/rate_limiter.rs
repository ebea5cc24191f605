//! Request spacing for the TMDB API.

use std::time::{Duration, Instant};

/// Default minimum interval between requests (~40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Single-tier rate limiter.
///
/// The home view fires five list requests at once and the detail view five
/// more; spacing them keeps the client under TMDB's ~40 req/s ceiling.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbRateLimiter {
    /// Minimum interval between requests.
    min_interval: Duration,
    /// Time the next request may start.
    next_slot: Option<Instant>,
}

impl TmdbRateLimiter {
    /// Creates a new rate limiter with the given minimum interval.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: None,
        }
    }

    /// Creates a new rate limiter with the default interval (25ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Reserves the next request slot and returns how long the caller must wait.
    ///
    /// Reserving (instead of sleeping while holding the limiter) lets
    /// concurrent callers release the lock immediately.
    pub(crate) fn reserve(&mut self, now: Instant) -> Duration {
        let start = self.next_slot.map_or(now, |slot| slot.max(now));
        self.next_slot = start.checked_add(self.min_interval);
        start.saturating_duration_since(now)
    }
}
