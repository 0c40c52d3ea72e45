//! Constant-latency wrapper.
//!
//! [`LatencyPadder`] runs a closure, measures it, and sleeps off whatever
//! is left of the target before returning the closure's value untouched.
//! [`ConstantLatency`] and [`wrap`] apply a padder to a one-argument
//! function so it can be passed around as an ordinary `Fn`.

use std::time::Duration;

use steadygate_core::ConfigError;
use tracing::debug;

use crate::delay::DelayCalculator;
use crate::sleeper::{PaddingSleeper, SleepOutcome, ThreadSleeper};
use crate::timer::TimedExecutor;

/// Pads any closure up to a fixed minimum duration.
///
/// Overrunning the target is never truncated; the value is returned as
/// soon as the closure finishes. Panics in the closure propagate without
/// padding.
#[derive(Debug, Clone)]
pub struct LatencyPadder<S = ThreadSleeper> {
    calculator: DelayCalculator,
    sleeper: S,
}

impl LatencyPadder<ThreadSleeper> {
    pub fn new(target_nanos: u64) -> Result<Self, ConfigError> {
        Self::with_sleeper(target_nanos, ThreadSleeper)
    }
}

impl<S> LatencyPadder<S> {
    pub fn target(&self) -> Duration {
        self.calculator.target()
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }
}

impl<S: PaddingSleeper> LatencyPadder<S> {
    /// Padder that sleeps through `sleeper`.
    ///
    /// # Errors
    /// [`ConfigError::TargetLatencyTooSmall`] when `target_nanos` is 0.
    pub fn with_sleeper(target_nanos: u64, sleeper: S) -> Result<Self, ConfigError> {
        Ok(Self {
            calculator: DelayCalculator::new(target_nanos)?,
            sleeper,
        })
    }

    /// Run `f`, pad to the target, return its value.
    pub fn run<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let timed = TimedExecutor::time(f);
        let delay = self.calculator.compute(timed.elapsed_nanos);

        if !delay.is_zero() {
            if let SleepOutcome::Interrupted { remaining } = self.sleeper.sleep(delay) {
                debug!(
                    remaining = ?remaining,
                    target_nanos = self.calculator.target_nanos(),
                    "Padding sleep interrupted, returning early"
                );
            }
        }

        timed.into_value()
    }
}

// ============================================================================
// FUNCTION WRAPPER
// ============================================================================

/// A one-argument function whose every call takes at least the target.
#[derive(Debug, Clone)]
pub struct ConstantLatency<F, S = ThreadSleeper> {
    inner: F,
    padder: LatencyPadder<S>,
}

impl<F> ConstantLatency<F, ThreadSleeper> {
    pub fn new(target_nanos: u64, inner: F) -> Result<Self, ConfigError> {
        Ok(Self::with_padder(inner, LatencyPadder::new(target_nanos)?))
    }
}

impl<F, S: PaddingSleeper> ConstantLatency<F, S> {
    pub fn with_padder(inner: F, padder: LatencyPadder<S>) -> Self {
        Self { inner, padder }
    }

    pub fn padder(&self) -> &LatencyPadder<S> {
        &self.padder
    }

    pub fn call<T, R>(&self, value: T) -> R
    where
        F: Fn(T) -> R,
    {
        self.padder.run(|| (self.inner)(value))
    }
}

/// Wrap `inner` so every call lasts at least `target_nanos`.
///
/// ```
/// let slow_len = steadygate_latency::wrap(|s: &str| s.len(), 1_000_000).unwrap();
/// assert_eq!(slow_len("abc"), 3);
/// ```
pub fn wrap<T, R, F>(inner: F, target_nanos: u64) -> Result<impl Fn(T) -> R, ConfigError>
where
    F: Fn(T) -> R,
{
    let wrapped = ConstantLatency::new(target_nanos, inner)?;
    Ok(move |value: T| wrapped.call(value))
}

// =============================================================================
// TESTS
// =============================================================================
