//! Time sources for the reactor.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::types::LogicalTime;

/// Supplies a monotonically non-decreasing logical clock.
///
/// Implemented by `SystemClock` (wall clock) and `ManualClock` (tests).
/// Also implemented for `Arc<T>` so one clock can be shared.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> LogicalTime;
}

/// Whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> LogicalTime {
        LogicalTime(Utc::now().timestamp().max(0) as u64)
    }
}

/// Settable clock for tests and deterministic replay. Clones share the same
/// reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    pub fn set(&self, value: u64) {
        self.now.store(value, Ordering::SeqCst);
    }

    /// Move forward by `units` and return the new reading.
    pub fn advance(&self, units: u64) -> LogicalTime {
        LogicalTime(self.now.fetch_add(units, Ordering::SeqCst) + units)
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> LogicalTime {
        LogicalTime(self.now.load(Ordering::SeqCst))
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> LogicalTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_reading() {
        let clock = ManualClock::new(7);
        let other = clock.clone();
        assert_eq!(other.advance(3), LogicalTime(10));
        assert_eq!(clock.now(), LogicalTime(10));
        clock.set(2);
        assert_eq!(other.now(), LogicalTime(2));
    }

    #[test]
    fn system_clock_is_past_epoch() {
        assert!(SystemClock.now() > LogicalTime(0));
    }
}
