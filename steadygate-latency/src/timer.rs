//! Wall-clock measurement of a single computation.

use std::time::{Duration, Instant};

/// A computation's result together with how long it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timed<R> {
    /// Elapsed monotonic time in nanoseconds, saturating at `u64::MAX`.
    pub elapsed_nanos: u64,
    /// Whatever the computation returned.
    pub value: R,
}

impl<R> Timed<R> {
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos)
    }

    pub fn into_value(self) -> R {
        self.value
    }
}

/// Times closures against the monotonic clock.
///
/// Wall-clock adjustments do not affect measurements. The closure is
/// invoked exactly once and nothing else happens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimedExecutor;

impl TimedExecutor {
    pub fn time<R, F>(f: F) -> Timed<R>
    where
        F: FnOnce() -> R,
    {
        let started = Instant::now();
        let value = f();
        let elapsed = started.elapsed();

        Timed {
            elapsed_nanos: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
            value,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
