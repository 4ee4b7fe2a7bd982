//! Time source abstraction for edit timestamps.
//!
//! # Responsibility
//! - Provide the epoch-millisecond readings stamped into `last_edit`.
//!
//! # Invariants
//! - Readings are expressed in milliseconds since the Unix epoch.
//! - `ManualClock` advances on every reading, so consecutive stamps taken
//!   from it are always distinct.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of edit timestamps.
///
/// `Send + Sync` so a store owning a boxed clock can live behind a
/// process-global mutex.
pub trait Clock: Send + Sync {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn epoch_millis(&self) -> i64;
}

/// Wall-clock time source used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_millis(&self) -> i64 {
        // A clock set before the Unix epoch degrades to 0 rather than panic.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as i64)
    }
}

/// Deterministic clock for tests: starts at a fixed instant and advances by
/// one millisecond per reading.
#[derive(Debug, Default)]
pub struct ManualClock {
    next: AtomicI64,
}

impl ManualClock {
    /// Creates a clock whose first reading is `epoch_millis`.
    pub fn starting_at(epoch_millis: i64) -> Self {
        Self {
            next: AtomicI64::new(epoch_millis),
        }
    }
}

impl Clock for ManualClock {
    fn epoch_millis(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, SystemClock};

    #[test]
    fn system_clock_reads_after_epoch() {
        assert!(SystemClock.epoch_millis() > 0);
    }

    #[test]
    fn manual_clock_advances_per_reading() {
        let clock = ManualClock::starting_at(1_000);
        assert_eq!(clock.epoch_millis(), 1_000);
        assert_eq!(clock.epoch_millis(), 1_001);
        assert_eq!(clock.epoch_millis(), 1_002);
    }
}
