//! steadygate Test Utilities
//!
//! Shared test infrastructure for the steadygate workspace:
//! - Proptest generators for identifiers, emails and configs
//! - Recording doubles for rules, observers and sleepers
//! - Fixtures with the canonical accepted/rejected inputs
//! - Assertions for outcomes and padded latency

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Re-export the manual clock from its source crate
pub use steadygate_cache::ManualClock;

// Re-export core types for convenience
pub use steadygate_core::{
    GateConfig, Outcome, Rule, RuleSet, RuleSetKind, ValidationObserver, ValidatorKind,
    ValueValidator, EMAIL_REJECTION_REASON, IDENTIFIER_REJECTION_REASON,
};

use steadygate_latency::{DelayPeriod, PaddingSleeper, SleepOutcome};

// ============================================================================
// TEST DOUBLES
// ============================================================================

/// A rule that counts how often it runs and returns a fixed verdict.
///
/// Clones share the counter, so one clone can go into a validator while the
/// test keeps the other.
#[derive(Debug, Clone)]
pub struct CountingRule {
    verdict: bool,
    calls: Arc<AtomicUsize>,
}

impl CountingRule {
    pub fn accepting() -> Self {
        Self::new(true)
    }

    pub fn rejecting() -> Self {
        Self::new(false)
    }

    fn new(verdict: bool) -> Self {
        Self {
            verdict,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Rule for CountingRule {
    fn test(&self, _candidate: Option<&str>) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.verdict
    }
}

/// A rule that takes a fixed amount of wall-clock time before answering.
#[derive(Debug, Clone, Copy)]
pub struct SlowRule {
    pub delay: Duration,
    pub verdict: bool,
}

impl Rule for SlowRule {
    fn test(&self, _candidate: Option<&str>) -> bool {
        std::thread::sleep(self.delay);
        self.verdict
    }
}

/// One observed validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedCall {
    pub kind: ValidatorKind,
    pub input: Option<String>,
    pub outcome: Option<Outcome>,
}

/// Observer that keeps every call it sees.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    calls: Mutex<Vec<ObservedCall>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<ObservedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ValidationObserver for RecordingObserver {
    fn checking(&self, kind: ValidatorKind, input: Option<&str>) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(ObservedCall {
                kind,
                input: input.map(str::to_owned),
                outcome: None,
            });
        }
    }

    fn checked(&self, kind: ValidatorKind, input: Option<&str>, outcome: &Outcome) {
        if let Ok(mut calls) = self.calls.lock() {
            let pending = calls.iter_mut().rev().find(|call| {
                call.kind == kind && call.input.as_deref() == input && call.outcome.is_none()
            });
            if let Some(call) = pending {
                call.outcome = Some(outcome.clone());
            }
        }
    }
}

/// Sleeper that records requested padding instead of sleeping.
///
/// Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    periods: Arc<Mutex<Vec<DelayPeriod>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn periods(&self) -> Vec<DelayPeriod> {
        self.periods.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl PaddingSleeper for RecordingSleeper {
    fn sleep(&self, period: DelayPeriod) -> SleepOutcome {
        if let Ok(mut periods) = self.periods.lock() {
            periods.push(period);
        }
        SleepOutcome::Completed
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for steadygate inputs.

    use super::*;
    use proptest::prelude::*;

    /// Identifiers the production rules accept: letters, digits and spaces,
    /// starting with a non-space and never containing `X`.
    pub fn arb_valid_identifier() -> impl Strategy<Value = String> {
        "[A-WYZa-z0-9][A-WYZa-z0-9 ]{0,29}"
    }

    /// Otherwise valid identifiers with an `X` spliced in.
    pub fn arb_identifier_with_x() -> impl Strategy<Value = String> {
        (arb_valid_identifier(), any::<prop::sample::Index>()).prop_map(|(mut id, at)| {
            let at = at.index(id.len() + 1);
            id.insert(at, 'X');
            id
        })
    }

    /// Otherwise valid identifiers with one ASCII punctuation character.
    pub fn arb_punctuated_identifier() -> impl Strategy<Value = String> {
        (arb_valid_identifier(), "[!-/:-@\\[-`{-~]")
            .prop_map(|(id, punct)| format!("{}{}", id, punct))
    }

    /// Empty or whitespace-only strings.
    pub fn arb_blank() -> impl Strategy<Value = String> {
        "[ \t]{0,6}"
    }

    /// Addresses the structural email rule accepts.
    pub fn arb_valid_email() -> impl Strategy<Value = String> {
        "[A-Za-z0-9]{1,8}([._-][A-Za-z0-9]{1,8})?@([A-Za-z0-9-]{1,8}\\.){1,2}[A-Za-z]{2,6}"
    }

    /// Addresses broken in one of the ways the structural rule must catch.
    pub fn arb_malformed_email() -> impl Strategy<Value = String> {
        let local = "[A-Za-z0-9]{1,8}";
        let domain = "[a-z]{1,8}\\.[a-z]{2,4}";
        prop_oneof![
            (local, local, domain).prop_map(|(a, b, d)| format!("{}..{}@{}", a, b, d)),
            (local, domain).prop_map(|(a, d)| format!(".{}@{}", a, d)),
            (local, domain).prop_map(|(a, d)| format!("{}-@{}", a, d)),
            (local, local, domain).prop_map(|(a, b, d)| format!("{}#{}@{}", a, b, d)),
            domain.prop_map(|d| format!("@{}", d)),
            local.prop_map(|a| format!("{}@", a)),
            (local, "[a-z]{1,8}", "[a-z]").prop_map(|(a, d, t)| format!("{}@{}.{}", a, d, t)),
        ]
    }

    pub fn arb_rule_set_kind() -> impl Strategy<Value = RuleSetKind> {
        prop_oneof![Just(RuleSetKind::Stub), Just(RuleSetKind::Production)]
    }

    pub fn arb_validator_kind() -> impl Strategy<Value = ValidatorKind> {
        prop_oneof![Just(ValidatorKind::Email), Just(ValidatorKind::Identifier)]
    }

    /// Configs that pass validation, with short latency targets.
    pub fn arb_valid_config() -> impl Strategy<Value = GateConfig> {
        (arb_rule_set_kind(), 1u64..=100_000, 1u64..=3_600, 1usize..=1_000).prop_map(
            |(rule_set_kind, target_latency_nanos, cache_ttl_seconds, cache_max_entries)| {
                GateConfig {
                    rule_set_kind,
                    target_latency_nanos,
                    cache_ttl_seconds,
                    cache_max_entries,
                }
            },
        )
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;

    /// Identifiers the production rules accept.
    pub const ACCEPTED_IDENTIFIERS: &[&str] = &["Steve", "StephenLimb", "Stephen John Limb"];

    /// Identifiers the production rules reject.
    pub const REJECTED_IDENTIFIERS: &[&str] = &[
        "SteveX",
        "Stephen X Limb",
        "StephenLimb!",
        "@StephenLimb",
        "@",
        "!",
        "{",
        "",
        " ",
        "    ",
    ];

    /// Emails the production rules accept.
    pub const ACCEPTED_EMAILS: &[&str] = &[
        "abc-d@mail.com",
        "abc.def@mail.com",
        "abc@mail.com",
        "abc_def@mail.com",
    ];

    /// Emails the production rules reject.
    pub const REJECTED_EMAILS: &[&str] = &[
        "abc-@mail.com",
        "abc..def@mail.com",
        ".abc@mail.com",
        "abc#def@mail.com",
        "@mail.com",
        "",
        " ",
    ];

    /// Production config with a 1ns target so tests do not sleep.
    pub fn fast_config() -> GateConfig {
        GateConfig {
            target_latency_nanos: 1,
            ..GateConfig::default()
        }
    }

    /// Production config with the given target.
    pub fn config_with_target(target_latency_nanos: u64) -> GateConfig {
        GateConfig {
            target_latency_nanos,
            ..GateConfig::default()
        }
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Assert `outcome` is a rejection carrying exactly `reason`.
pub fn assert_rejected_with(outcome: &Outcome, reason: &str) {
    assert!(
        !outcome.is_acceptable(),
        "expected rejection with {:?}, got acceptance",
        reason
    );
    assert_eq!(outcome.reason(), Some(reason));
}

/// Assert `outcome` is an acceptance with no reason.
pub fn assert_accepted(outcome: &Outcome) {
    assert!(
        outcome.is_acceptable(),
        "expected acceptance, got rejection: {:?}",
        outcome.reason()
    );
    assert_eq!(outcome.reason(), None);
}

/// Assert a call lasted at least `target`.
pub fn assert_padded(elapsed: Duration, target: Duration) {
    assert!(
        elapsed >= target,
        "call returned after {:?}, before the {:?} target",
        elapsed,
        target
    );
}
