//! steadygate Latency - Constant-Latency Evaluation
//!
//! Forces a computation to take at least a fixed wall-clock duration, so the
//! time a caller observes says nothing about which branch ran inside it.
//!
//! The pieces compose bottom-up:
//! - [`TimedExecutor`] measures a closure on the monotonic clock
//! - [`DelayCalculator`] turns elapsed time into the padding still owed
//! - [`PaddingSleeper`] blocks for that padding (optionally interruptible)
//! - [`LatencyPadder`] / [`ConstantLatency`] tie them together
//!
//! This normalises the duration of a whole computation. It is not an
//! instruction-level constant-time primitive.

pub mod delay;
pub mod sleeper;
pub mod timer;
pub mod wrapper;

pub use delay::{DelayCalculator, DelayPeriod, NANOS_PER_MILLI};
pub use sleeper::{
    InterruptibleSleeper, PaddingSleeper, SleepInterrupt, SleepOutcome, ThreadSleeper,
};
pub use timer::{Timed, TimedExecutor};
pub use wrapper::{wrap, ConstantLatency, LatencyPadder};
