//! Sleeping for computed padding.
//!
//! [`ThreadSleeper`] blocks the calling thread for the full period.
//! [`InterruptibleSleeper`] can be woken early through a [`SleepInterrupt`]
//! handle; the wrapper then abandons the remaining padding and hands the
//! already-computed result back.

use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::delay::DelayPeriod;

/// How a padding sleep ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    /// Slept for the whole period.
    Completed,
    /// Woken early; `remaining` padding was skipped.
    Interrupted { remaining: Duration },
}

impl SleepOutcome {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, SleepOutcome::Interrupted { .. })
    }
}

/// Blocks for a padding period.
pub trait PaddingSleeper: Send + Sync {
    fn sleep(&self, period: DelayPeriod) -> SleepOutcome;
}

impl<S: PaddingSleeper + ?Sized> PaddingSleeper for Arc<S> {
    fn sleep(&self, period: DelayPeriod) -> SleepOutcome {
        (**self).sleep(period)
    }
}

// ============================================================================
// THREAD SLEEPER
// ============================================================================

/// Plain `std::thread::sleep`. Cannot be interrupted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl PaddingSleeper for ThreadSleeper {
    fn sleep(&self, period: DelayPeriod) -> SleepOutcome {
        if !period.is_zero() {
            thread::sleep(period.as_duration());
        }
        SleepOutcome::Completed
    }
}

// ============================================================================
// INTERRUPTIBLE SLEEPER
// ============================================================================

#[derive(Debug, Default)]
struct InterruptSignal {
    /// Bumped by every interrupt. A sleep ends early once it moves.
    generation: Mutex<u64>,
    wakeup: Condvar,
}

/// Sleeper that a [`SleepInterrupt`] can wake early.
///
/// An interrupt wakes only the sleeps in progress when it is raised. Nothing
/// stays pending: a sleep that starts afterwards runs its full period. Every
/// caller sharing the sleeper is woken, so give each execution context its
/// own sleeper to interrupt one call alone.
#[derive(Debug, Default)]
pub struct InterruptibleSleeper {
    signal: Arc<InterruptSignal>,
}

/// Cloneable handle that interrupts an [`InterruptibleSleeper`].
#[derive(Debug, Clone)]
pub struct SleepInterrupt {
    signal: Arc<InterruptSignal>,
}

impl InterruptibleSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interrupt_handle(&self) -> SleepInterrupt {
        SleepInterrupt {
            signal: Arc::clone(&self.signal),
        }
    }
}

impl SleepInterrupt {
    /// Wake every sleep currently in progress.
    pub fn interrupt(&self) {
        // A poisoned counter still holds a number; keep going with it.
        let mut generation = match self.signal.generation.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *generation = generation.wrapping_add(1);
        self.signal.wakeup.notify_all();
    }
}

impl PaddingSleeper for InterruptibleSleeper {
    fn sleep(&self, period: DelayPeriod) -> SleepOutcome {
        if period.is_zero() {
            return SleepOutcome::Completed;
        }

        let wait = period.as_duration();
        let started = Instant::now();

        let guard = match self.signal.generation.lock() {
            Ok(guard) => guard,
            Err(_) => return SleepOutcome::Interrupted { remaining: wait },
        };
        let entered = *guard;

        let (generation, _) = match self
            .signal
            .wakeup
            .wait_timeout_while(guard, wait, |generation| *generation == entered)
        {
            Ok(result) => result,
            Err(_) => {
                return SleepOutcome::Interrupted {
                    remaining: wait.saturating_sub(started.elapsed()),
                }
            }
        };

        if *generation != entered {
            SleepOutcome::Interrupted {
                remaining: wait.saturating_sub(started.elapsed()),
            }
        } else {
            SleepOutcome::Completed
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
