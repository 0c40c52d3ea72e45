//! Per-call observation hook.
//!
//! Validators report every call here. Observation is a side concern: it
//! cannot change an outcome and never fails.

use tracing::debug;

use crate::{Outcome, ValidatorKind};

/// Receives a note of every validation call.
pub trait ValidationObserver: Send + Sync {
    /// Called before the input is classified.
    fn checking(&self, kind: ValidatorKind, input: Option<&str>);

    /// Called with the outcome handed back to the caller.
    fn checked(&self, _kind: ValidatorKind, _input: Option<&str>, _outcome: &Outcome) {}
}

/// Logs each call at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ValidationObserver for TracingObserver {
    fn checking(&self, kind: ValidatorKind, input: Option<&str>) {
        debug!(kind = %kind, input = ?input, "checking validity");
    }

    fn checked(&self, kind: ValidatorKind, input: Option<&str>, outcome: &Outcome) {
        debug!(
            kind = %kind,
            input = ?input,
            acceptable = outcome.is_acceptable(),
            reason = ?outcome.reason(),
            "validity checked"
        );
    }
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ValidationObserver for NoopObserver {
    fn checking(&self, _kind: ValidatorKind, _input: Option<&str>) {}
}
