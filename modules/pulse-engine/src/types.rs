//! Event model.

use std::fmt;

/// Monotonic count of elapsed logical time units (seconds for `SystemClock`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalTime(pub u64);

impl LogicalTime {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LogicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Produced by the timer arrival detector.
    Timer,
    /// Produced by a timer handler spending budget.
    Internal,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Timer => f.write_str("timer"),
            EventKind::Internal => f.write_str("internal"),
        }
    }
}

/// A single occurrence. Two events with the same kind and timestamp are still
/// distinct occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub timestamp: LogicalTime,
}

impl Event {
    pub fn timer(timestamp: LogicalTime) -> Self {
        Self {
            kind: EventKind::Timer,
            timestamp,
        }
    }

    pub fn internal(timestamp: LogicalTime) -> Self {
        Self {
            kind: EventKind::Internal,
            timestamp,
        }
    }

    pub fn is_timer(&self) -> bool {
        self.kind == EventKind::Timer
    }
}
