//! Edge-triggered timer arrival detection.

use crate::clock::TimeSource;

/// Fires at most once per elapsed timer unit.
///
/// Logical time is bucketed into units of `tick_interval`. The first poll
/// always fires; afterwards a poll fires only when the current unit is
/// strictly greater than the last one that fired. A clock that goes backwards
/// never fires until it passes the remembered unit again.
#[derive(Debug, Clone)]
pub struct TimerArrivalDetector<C> {
    clock: C,
    tick_interval: u64,
    last_fired: Option<u64>,
}

impl<C: TimeSource> TimerArrivalDetector<C> {
    /// Panics if `tick_interval` is zero.
    pub fn new(clock: C, tick_interval: u64) -> Self {
        assert!(tick_interval > 0, "tick interval must be at least 1");
        Self {
            clock,
            tick_interval,
            last_fired: None,
        }
    }

    /// Returns true exactly once per new unit.
    pub fn poll(&mut self) -> bool {
        let unit = self.clock.now().as_u64() / self.tick_interval;
        match self.last_fired {
            Some(last) if unit <= last => false,
            _ => {
                self.last_fired = Some(unit);
                true
            }
        }
    }

    /// Last unit that fired, if any.
    pub fn last_fired(&self) -> Option<u64> {
        self.last_fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn fires_once_per_unit() {
        let clock = ManualClock::new(100);
        let mut detector = TimerArrivalDetector::new(clock.clone(), 1);

        assert!(detector.poll());
        assert!(!detector.poll());
        assert!(!detector.poll());

        clock.advance(1);
        assert!(detector.poll());
        assert!(!detector.poll());
    }

    #[test]
    fn skipped_units_produce_a_single_fire() {
        let clock = ManualClock::new(0);
        let mut detector = TimerArrivalDetector::new(clock.clone(), 1);
        assert!(detector.poll());

        clock.advance(10);
        assert!(detector.poll());
        assert!(!detector.poll());
        assert_eq!(detector.last_fired(), Some(10));
    }

    #[test]
    fn coarse_interval_buckets_time() {
        let clock = ManualClock::new(10);
        let mut detector = TimerArrivalDetector::new(clock.clone(), 5);
        assert!(detector.poll());

        clock.set(14);
        assert!(!detector.poll());
        clock.set(15);
        assert!(detector.poll());
    }

    #[test]
    fn backwards_clock_does_not_fire() {
        let clock = ManualClock::new(50);
        let mut detector = TimerArrivalDetector::new(clock.clone(), 1);
        assert!(detector.poll());

        clock.set(40);
        assert!(!detector.poll());
        clock.set(50);
        assert!(!detector.poll());
        clock.set(51);
        assert!(detector.poll());
    }
}
