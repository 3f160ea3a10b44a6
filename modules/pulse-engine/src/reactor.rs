//! The reactor loop.

use std::fmt;

use pulse_common::ReactorConfig;
use tracing::info;

use crate::budget::Budget;
use crate::clock::TimeSource;
use crate::detector::TimerArrivalDetector;
use crate::dispatcher::{DispatchOutcome, Dispatcher};
use crate::queue::BoundedQueue;
use crate::shutdown::Shutdown;
use crate::types::Event;

/// Result of a single reactor cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Queue was empty after arrival detection.
    Idle,
    Dispatched {
        event: Event,
        outcome: DispatchOutcome,
    },
}

/// Counters for a reactor's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReactorStats {
    pub cycles: u64,
    pub dispatched: u64,
    pub timers_enqueued: u64,
    pub dropped: u64,
    pub emitted: u64,
    pub denied: u64,
}

impl fmt::Display for ReactorStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cycles={} dispatched={} timers={} dropped={} internal_emitted={} denied={}",
            self.cycles,
            self.dispatched,
            self.timers_enqueued,
            self.dropped,
            self.emitted,
            self.denied
        )
    }
}

/// Single-threaded driver: detect arrivals, drain one event, dispatch, pace.
///
/// Owns the queue, detector, dispatcher and budget. Events pushed by a handler
/// are observed on a later cycle, never within the dispatch that produced them.
pub struct Reactor<C> {
    config: ReactorConfig,
    clock: C,
    queue: BoundedQueue,
    detector: TimerArrivalDetector<C>,
    dispatcher: Dispatcher<C>,
    budget: Budget,
    cycle_limit: Option<u64>,
    cycles: u64,
    dispatched: u64,
    timers_enqueued: u64,
}

impl<C: TimeSource + Clone> Reactor<C> {
    /// `config` is expected to have passed `ReactorConfig::validate`.
    pub fn new(config: ReactorConfig, clock: C) -> Self {
        Self {
            queue: BoundedQueue::with_capacity(config.capacity),
            detector: TimerArrivalDetector::new(clock.clone(), config.tick_interval_secs),
            dispatcher: Dispatcher::new(clock.clone(), config.internal_event_period),
            budget: Budget::default(),
            clock,
            config,
            cycle_limit: None,
            cycles: 0,
            dispatched: 0,
            timers_enqueued: 0,
        }
    }

    /// Stop `run` on its own after `limit` cycles.
    pub fn with_cycle_limit(mut self, limit: u64) -> Self {
        self.cycle_limit = Some(limit);
        self
    }

    /// One cycle without pacing.
    pub fn step(&mut self) -> CycleOutcome {
        self.cycles += 1;

        if self.detector.poll() {
            self.queue.push(Event::timer(self.clock.now()));
            self.timers_enqueued += 1;
        }

        let Some(event) = self.queue.pop() else {
            return CycleOutcome::Idle;
        };

        if event.is_timer() {
            self.budget.reset(self.config.budget_quota);
        }

        let outcome = self
            .dispatcher
            .dispatch(event, &mut self.budget, &mut self.queue);
        self.dispatched += 1;

        CycleOutcome::Dispatched { event, outcome }
    }

    /// Cycle until `shutdown` fires (or the cycle limit is reached), pacing
    /// between cycles. The pacing wait is cut short by shutdown.
    pub async fn run(&mut self, shutdown: &Shutdown) -> ReactorStats {
        let pace = self.config.pace_interval();
        info!(
            capacity = self.queue.capacity(),
            pace_ms = pace.as_millis() as u64,
            "Reactor loop starting"
        );

        loop {
            if shutdown.is_triggered() {
                info!("Shutdown requested");
                break;
            }
            if self.cycle_limit.is_some_and(|limit| self.cycles >= limit) {
                info!(cycles = self.cycles, "Cycle limit reached");
                break;
            }

            self.step();

            tokio::select! {
                _ = tokio::time::sleep(pace) => {}
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested during pacing");
                    break;
                }
            }
        }

        let stats = self.stats();
        info!("Reactor stopped. {stats}");
        stats
    }

    pub fn stats(&self) -> ReactorStats {
        ReactorStats {
            cycles: self.cycles,
            dispatched: self.dispatched,
            timers_enqueued: self.timers_enqueued,
            dropped: self.queue.dropped_total(),
            emitted: self.dispatcher.emitted_total(),
            denied: self.dispatcher.denied_total(),
        }
    }

    pub fn queue(&self) -> &BoundedQueue {
        &self.queue
    }

    /// Mutable queue access for injecting events from outside the loop.
    pub fn queue_mut(&mut self) -> &mut BoundedQueue {
        &mut self.queue
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn config(&self) -> &ReactorConfig {
        &self.config
    }
}
