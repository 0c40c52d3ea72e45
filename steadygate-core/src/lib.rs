//! steadygate Core - Outcomes, Rules and Configuration
//!
//! Pure, deterministic validation building blocks. Nothing in this crate
//! sleeps, caches or performs I/O beyond reading a config file; latency
//! shaping and memoisation live in `steadygate-latency` and `steadygate-cache`.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

pub mod config;
pub mod error;
pub mod observer;
pub mod rule;
pub mod rules;
pub mod validator;

pub use config::GateConfig;
pub use error::{ConfigError, GateError, GateResult};
pub use observer::{NoopObserver, TracingObserver, ValidationObserver};
pub use rule::{AllOf, And, Rule};
pub use rules::{RuleSet, RuleSetKind, EMAIL_REJECTION_REASON, IDENTIFIER_REJECTION_REASON};
pub use validator::ValueValidator;

// ============================================================================
// OUTCOME
// ============================================================================

/// The accept/reject verdict of a validation.
///
/// A reason is carried if and only if the value was rejected. The fields are
/// private so that invariant cannot be broken after construction; outcomes
/// are immutable and cheap to clone (static reasons are borrowed, not copied).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OutcomeWire", into = "OutcomeWire")]
pub struct Outcome {
    acceptable: bool,
    reason: Option<Cow<'static, str>>,
}

impl Outcome {
    /// The accepted outcome. Carries no reason.
    pub const fn accepted() -> Self {
        Self {
            acceptable: true,
            reason: None,
        }
    }

    /// A rejected outcome carrying the reason shown to the caller.
    pub fn rejected(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            acceptable: false,
            reason: Some(reason.into()),
        }
    }

    /// Whether the value passed validation.
    pub fn is_acceptable(&self) -> bool {
        self.acceptable
    }

    /// Why the value was rejected; `None` for accepted outcomes.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// JSON body shape: `{"acceptable": bool, "reasonUnacceptable": string|null}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeWire {
    acceptable: bool,
    reason_unacceptable: Option<String>,
}

impl From<Outcome> for OutcomeWire {
    fn from(outcome: Outcome) -> Self {
        Self {
            acceptable: outcome.acceptable,
            reason_unacceptable: outcome.reason.map(Cow::into_owned),
        }
    }
}

impl TryFrom<OutcomeWire> for Outcome {
    type Error = String;

    fn try_from(wire: OutcomeWire) -> Result<Self, Self::Error> {
        match (wire.acceptable, wire.reason_unacceptable) {
            (true, None) => Ok(Outcome::accepted()),
            (false, Some(reason)) => Ok(Outcome::rejected(reason)),
            (true, Some(_)) => Err("an acceptable outcome cannot carry a reason".to_string()),
            (false, None) => Err("an unacceptable outcome must carry a reason".to_string()),
        }
    }
}

// ============================================================================
// VALIDATOR KINDS
// ============================================================================

/// The kinds of value the service validates.
///
/// Each kind gets its own cache namespace and its own rule chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorKind {
    Email,
    Identifier,
}

impl ValidatorKind {
    /// All kinds, in a stable order.
    pub const ALL: [ValidatorKind; 2] = [ValidatorKind::Email, ValidatorKind::Identifier];

    /// Stable lowercase name, also used as the cache namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKind::Email => "email",
            ValidatorKind::Identifier => "identifier",
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================
