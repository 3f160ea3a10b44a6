//! Routes dequeued events to their handlers.

use tracing::{error, info, warn};

use crate::budget::Budget;
use crate::clock::TimeSource;
use crate::queue::BoundedQueue;
use crate::types::{Event, EventKind};

/// What a single dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Timer {
        /// Lifetime tick number, starting at 1.
        tick: u64,
        /// Internal event pushed onto the queue, if any.
        emitted: Option<Event>,
        /// An emission was due but the budget was exhausted.
        denied: bool,
    },
    Internal,
}

/// Timer handler emits an internal event every `internal_event_period` ticks
/// while budget remains. Internal handler only records the decision.
///
/// The tick counter persists for the lifetime of the dispatcher. The budget is
/// owned by the caller, which resets it before each timer dispatch.
#[derive(Debug)]
pub struct Dispatcher<C> {
    clock: C,
    internal_event_period: u64,
    ticks: u64,
    emitted_total: u64,
    denied_total: u64,
}

impl<C: TimeSource> Dispatcher<C> {
    /// Panics if `internal_event_period` is zero.
    pub fn new(clock: C, internal_event_period: u64) -> Self {
        assert!(
            internal_event_period > 0,
            "internal event period must be at least 1"
        );
        Self {
            clock,
            internal_event_period,
            ticks: 0,
            emitted_total: 0,
            denied_total: 0,
        }
    }

    /// Run the handler for `event`. Emitted events land at the back of `queue`
    /// and are never seen by this call.
    ///
    /// Panics if the budget is negative afterwards.
    pub fn dispatch(
        &mut self,
        event: Event,
        budget: &mut Budget,
        queue: &mut BoundedQueue,
    ) -> DispatchOutcome {
        let outcome = match event.kind {
            EventKind::Timer => self.handle_timer(event, budget, queue),
            EventKind::Internal => self.handle_internal(event),
        };

        if budget.is_underflowed() {
            error!(
                budget = budget.remaining(),
                kind = %event.kind,
                "Internal budget underflow, invariant violated"
            );
            panic!(
                "internal budget underflow after {} dispatch: {}",
                event.kind, budget
            );
        }

        outcome
    }

    fn handle_timer(
        &mut self,
        event: Event,
        budget: &mut Budget,
        queue: &mut BoundedQueue,
    ) -> DispatchOutcome {
        self.ticks += 1;
        let tick = self.ticks;
        info!(tick, timestamp = %event.timestamp, "Timer tick");

        if tick % self.internal_event_period != 0 {
            return DispatchOutcome::Timer {
                tick,
                emitted: None,
                denied: false,
            };
        }

        if !budget.has_remaining() {
            self.denied_total += 1;
            warn!(tick, budget = budget.remaining(), "Internal event budget exhausted");
            return DispatchOutcome::Timer {
                tick,
                emitted: None,
                denied: true,
            };
        }

        let internal = Event::internal(self.clock.now());
        queue.push(internal);
        budget.spend();
        self.emitted_total += 1;

        DispatchOutcome::Timer {
            tick,
            emitted: Some(internal),
            denied: false,
        }
    }

    fn handle_internal(&mut self, event: Event) -> DispatchOutcome {
        info!(timestamp = %event.timestamp, "Internal decision");
        DispatchOutcome::Internal
    }

    /// Timer events handled so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn emitted_total(&self) -> u64 {
        self.emitted_total
    }

    pub fn denied_total(&self) -> u64 {
        self.denied_total
    }
}
