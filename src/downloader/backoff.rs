//! Delays inserted between retries.
//!
//! The delay starts at a small base and doubles on every retry until it
//! reaches a ceiling, where it stays.
//!
//! ```rust
//! use abc::downloader::Backoff;
//! use std::time::Duration;
//!
//! let backoff = Backoff::default();
//! let first = backoff.initial();
//! assert_eq!(first, Duration::from_millis(200));
//! assert_eq!(backoff.next(first), Duration::from_millis(400));
//! assert_eq!(backoff.next(Duration::from_secs(299)), Duration::from_secs(300));
//! ```

use std::time::Duration;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(200);

/// Default ceiling for the delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(300);

/// Exponential backoff policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
    max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_DELAY,
            max: DEFAULT_MAX_DELAY,
        }
    }
}

impl Backoff {
    /// Creates a policy starting at `base` and never exceeding `max`.
    ///
    /// A ceiling below the base is raised to the base.
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max: max.max(base),
        }
    }

    /// Delay before the first retry.
    pub fn initial(&self) -> Duration {
        self.base
    }

    /// Delay following `current`.
    pub fn next(&self, current: Duration) -> Duration {
        current.max(self.base).saturating_mul(2).min(self.max)
    }

    /// Ceiling of the delay.
    pub fn max(&self) -> Duration {
        self.max
    }
}
