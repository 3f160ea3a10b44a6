//! Single-threaded reactor core.
//!
//! A timer source feeds a bounded drop-oldest queue; the reactor drains one
//! event per cycle and hands it to the dispatcher. Timer handlers may emit
//! internal events back into the same queue, gated by a per-tick budget.

pub mod budget;
pub mod clock;
pub mod detector;
pub mod dispatcher;
pub mod queue;
pub mod reactor;
pub mod shutdown;
pub mod types;

pub use budget::Budget;
pub use clock::{ManualClock, SystemClock, TimeSource};
pub use detector::TimerArrivalDetector;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use queue::BoundedQueue;
pub use reactor::{CycleOutcome, Reactor, ReactorStats};
pub use shutdown::Shutdown;
pub use types::{Event, EventKind, LogicalTime};
