//! Fixed-capacity FIFO with a drop-oldest overflow policy.

use std::collections::VecDeque;

use tracing::{info, warn};

use crate::types::Event;

/// Bounded event queue. `push` never blocks or rejects: when full, the oldest
/// event is evicted to make room. `pop` on an empty queue is a normal outcome.
#[derive(Debug)]
pub struct BoundedQueue {
    events: VecDeque<Event>,
    capacity: usize,
    pushed_total: u64,
    dropped_total: u64,
}

impl BoundedQueue {
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be at least 1");
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            pushed_total: 0,
            dropped_total: 0,
        }
    }

    /// Append an event. Returns the evicted event if the queue was full.
    pub fn push(&mut self, event: Event) -> Option<Event> {
        let dropped = if self.is_full() {
            let oldest = self.events.pop_front();
            if let Some(old) = &oldest {
                self.dropped_total += 1;
                warn!(
                    kind = %old.kind,
                    timestamp = %old.timestamp,
                    dropped_total = self.dropped_total,
                    "Queue full, dropped oldest event"
                );
            }
            oldest
        } else {
            None
        };

        self.events.push_back(event);
        self.pushed_total += 1;
        info!(
            kind = %event.kind,
            occupancy = self.events.len(),
            "Event enqueued"
        );
        dropped
    }

    /// Remove and return the oldest event, or `None` if there is nothing to do.
    pub fn pop(&mut self) -> Option<Event> {
        let event = self.events.pop_front()?;
        info!(
            kind = %event.kind,
            occupancy = self.events.len(),
            "Event dequeued"
        );
        Some(event)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.events.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Queued events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn pushed_total(&self) -> u64 {
        self.pushed_total
    }

    pub fn dropped_total(&self) -> u64 {
        self.dropped_total
    }
}
