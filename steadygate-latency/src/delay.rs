//! Padding calculation.
//!
//! Given a configured target in nanoseconds, [`DelayCalculator`] takes the
//! elapsed duration of a computation and returns the delay, split into
//! milliseconds and a sub-millisecond nanosecond remainder, that brings the
//! total up to the target. A computation that met or overran the target
//! gets a zero delay, never a negative one.

use std::time::Duration;

use steadygate_core::ConfigError;

pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// An amount of padding to sleep.
///
/// `nanos` is always below one millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DelayPeriod {
    millis: u64,
    nanos: u32,
}

impl DelayPeriod {
    pub const ZERO: DelayPeriod = DelayPeriod { millis: 0, nanos: 0 };

    /// Split a nanosecond count into whole milliseconds and the remainder.
    pub fn from_nanos(total_nanos: u64) -> Self {
        Self {
            millis: total_nanos / NANOS_PER_MILLI,
            // Remainder is < 1_000_000, always fits.
            nanos: (total_nanos % NANOS_PER_MILLI) as u32,
        }
    }

    pub fn millis(&self) -> u64 {
        self.millis
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    /// `millis * 1_000_000 + nanos`, saturating.
    pub fn total_nanos(&self) -> u64 {
        self.millis
            .saturating_mul(NANOS_PER_MILLI)
            .saturating_add(u64::from(self.nanos))
    }

    pub fn is_zero(&self) -> bool {
        self.millis == 0 && self.nanos == 0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.millis) + Duration::from_nanos(u64::from(self.nanos))
    }
}

/// Computes the padding owed against a fixed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayCalculator {
    target_nanos: u64,
}

impl DelayCalculator {
    /// Create a calculator for `target_nanos`.
    ///
    /// # Errors
    /// [`ConfigError::TargetLatencyTooSmall`] when the target is below 1ns.
    pub fn new(target_nanos: u64) -> Result<Self, ConfigError> {
        if target_nanos < 1 {
            return Err(ConfigError::TargetLatencyTooSmall);
        }
        Ok(Self { target_nanos })
    }

    pub fn target_nanos(&self) -> u64 {
        self.target_nanos
    }

    pub fn target(&self) -> Duration {
        Duration::from_nanos(self.target_nanos)
    }

    /// Padding needed after a computation that took `elapsed_nanos`.
    pub fn compute(&self, elapsed_nanos: u64) -> DelayPeriod {
        if elapsed_nanos >= self.target_nanos {
            return DelayPeriod::ZERO;
        }
        DelayPeriod::from_nanos(self.target_nanos - elapsed_nanos)
    }
}

// =============================================================================
// TESTS
// =============================================================================
