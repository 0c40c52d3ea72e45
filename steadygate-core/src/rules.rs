//! Concrete rule sets and the start-up factory that selects one.
//!
//! Two rule sets exist: `stub`, which accepts every candidate (including
//! absent ones), and `production`, which applies the identifier and email
//! checks below. The choice is made once from configuration.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rule::AllOf;
use crate::validator::ValueValidator;

/// Rejection reason for user identifiers.
pub const IDENTIFIER_REJECTION_REASON: &str = "Fails Business Logic Check";

/// Rejection reason for email addresses.
pub const EMAIL_REJECTION_REASON: &str = "Fails Email Validation Check";

/// The character no production identifier may contain.
const FORBIDDEN_IDENTIFIER_CHAR: char = 'X';

/// Local part, `@`, then dot-separated labels ending in an alphabetic TLD.
static EMAIL_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(?:[._-][A-Za-z0-9]+)?@(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,}$")
        .map_err(|e| tracing::error!(error = %e, "email pattern failed to compile"))
        .ok()
});

// ============================================================================
// PREDICATES
// ============================================================================

/// Accepts every candidate, absent ones included.
pub fn accept_all(_candidate: Option<&str>) -> bool {
    true
}

/// Present and not blank (whitespace only counts as blank).
pub fn has_value(candidate: Option<&str>) -> bool {
    candidate.is_some_and(|value| !value.trim().is_empty())
}

/// Does not contain the literal character `X`. Absent input contains nothing.
pub fn lacks_forbidden_char(candidate: Option<&str>) -> bool {
    candidate.map_or(true, |value| !value.contains(FORBIDDEN_IDENTIFIER_CHAR))
}

/// Contains no ASCII punctuation: ``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``.
pub fn lacks_punctuation(candidate: Option<&str>) -> bool {
    candidate.map_or(true, |value| !value.chars().any(|c| c.is_ascii_punctuation()))
}

/// Structural email check.
///
/// The local part is alphanumeric with at most one interior `.`, `_` or `-`.
/// The domain is one or more alphanumeric/hyphen labels followed by a
/// top-level label of at least two letters.
pub fn is_structural_email(candidate: Option<&str>) -> bool {
    match (candidate, EMAIL_PATTERN.as_ref()) {
        (Some(value), Some(pattern)) => pattern.is_match(value),
        _ => false,
    }
}

// ============================================================================
// RULE SETS
// ============================================================================

/// Which rule set is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSetKind {
    /// Accept everything. For local development and wiring tests.
    Stub,
    /// The real checks.
    #[default]
    #[serde(alias = "prd")]
    Production,
}

impl RuleSetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSetKind::Stub => "stub",
            RuleSetKind::Production => "production",
        }
    }
}

impl FromStr for RuleSetKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stub" => Ok(RuleSetKind::Stub),
            "production" | "prd" => Ok(RuleSetKind::Production),
            other => Err(ConfigError::invalid_value(
                "rule_set_kind",
                other,
                "expected 'stub' or 'production'",
            )),
        }
    }
}

/// The pair of validators for one rule set.
#[derive(Debug)]
pub struct RuleSet {
    pub kind: RuleSetKind,
    pub identifier: ValueValidator,
    pub email: ValueValidator,
}

impl RuleSet {
    /// Resolve the validators for a rule set kind.
    pub fn for_kind(kind: RuleSetKind) -> Self {
        match kind {
            RuleSetKind::Stub => Self::stub(),
            RuleSetKind::Production => Self::production(),
        }
    }

    /// Everything passes; reasons are still the production ones.
    pub fn stub() -> Self {
        Self {
            kind: RuleSetKind::Stub,
            identifier: ValueValidator::new(accept_all, IDENTIFIER_REJECTION_REASON),
            email: ValueValidator::new(accept_all, EMAIL_REJECTION_REASON),
        }
    }

    pub fn production() -> Self {
        let identifier = AllOf::new()
            .with(has_value)
            .with(lacks_forbidden_char)
            .with(lacks_punctuation);

        Self {
            kind: RuleSetKind::Production,
            identifier: ValueValidator::new(identifier, IDENTIFIER_REJECTION_REASON),
            email: ValueValidator::new(is_structural_email, EMAIL_REJECTION_REASON),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome;

    fn assert_rejected(validator: &ValueValidator, input: Option<&str>, reason: &str) {
        let outcome = validator.evaluate(input);
        assert!(!outcome.is_acceptable(), "{:?} should be rejected", input);
        assert_eq!(outcome.reason(), Some(reason));
    }

    fn assert_accepted(validator: &ValueValidator, input: Option<&str>) {
        let outcome = validator.evaluate(input);
        assert_eq!(outcome, Outcome::accepted(), "{:?} should be accepted", input);
    }

    // ------------------------------------------------------------------------
    // Identifier
    // ------------------------------------------------------------------------

    #[test]
    fn test_identifier_accepts_plain_names() {
        let rules = RuleSet::production();
        for input in ["Steve", "StephenLimb", "Stephen John Limb"] {
            assert_accepted(&rules.identifier, Some(input));
        }
    }

    #[test]
    fn test_identifier_rejects_capital_x() {
        let rules = RuleSet::production();
        for input in ["SteveX", "Stephen X Limb"] {
            assert_rejected(&rules.identifier, Some(input), IDENTIFIER_REJECTION_REASON);
        }
    }

    #[test]
    fn test_identifier_allows_lowercase_x() {
        let rules = RuleSet::production();
        assert_accepted(&rules.identifier, Some("Maxine"));
    }

    #[test]
    fn test_identifier_rejects_punctuation() {
        let rules = RuleSet::production();
        for input in ["StephenLimb!", "@StephenLimb", "@", "!", "{"] {
            assert_rejected(&rules.identifier, Some(input), IDENTIFIER_REJECTION_REASON);
        }
    }

    #[test]
    fn test_identifier_rejects_absent_and_blank() {
        let rules = RuleSet::production();
        assert_rejected(&rules.identifier, None, IDENTIFIER_REJECTION_REASON);
        for input in ["", " ", "    "] {
            assert_rejected(&rules.identifier, Some(input), IDENTIFIER_REJECTION_REASON);
        }
    }

    // ------------------------------------------------------------------------
    // Email
    // ------------------------------------------------------------------------

    #[test]
    fn test_email_accepts_valid_local_parts() {
        let rules = RuleSet::production();
        for input in [
            "abc-d@mail.com",
            "abc.def@mail.com",
            "abc@mail.com",
            "abc_def@mail.com",
        ] {
            assert_accepted(&rules.email, Some(input));
        }
    }

    #[test]
    fn test_email_accepts_valid_domains() {
        let rules = RuleSet::production();
        for input in [
            "abc.def@mail.cc",
            "abc.def@mail-archive.com",
            "abc.def@mail.org",
            "abc.def@mail.co.uk",
        ] {
            assert_accepted(&rules.email, Some(input));
        }
    }

    #[test]
    fn test_email_rejects_bad_local_parts() {
        let rules = RuleSet::production();
        for input in [
            "abc-@mail.com",
            "abc..def@mail.com",
            ".abc@mail.com",
            "abc#def@mail.com",
            "@mail.com",
        ] {
            assert_rejected(&rules.email, Some(input), EMAIL_REJECTION_REASON);
        }
    }

    #[test]
    fn test_email_rejects_bad_domains() {
        let rules = RuleSet::production();
        for input in [
            "abc.def@mail.c",
            "abc.def@mail#archive.com",
            "abc.def@mail",
            "abc.def@mail..com",
            "abc.def@",
            "abc@mail.com\n",
        ] {
            assert_rejected(&rules.email, Some(input), EMAIL_REJECTION_REASON);
        }
    }

    #[test]
    fn test_email_rejects_absent_and_blank() {
        let rules = RuleSet::production();
        assert_rejected(&rules.email, None, EMAIL_REJECTION_REASON);
        for input in ["", " ", "    ", "@", " @ ", "   @   "] {
            assert_rejected(&rules.email, Some(input), EMAIL_REJECTION_REASON);
        }
    }

    // ------------------------------------------------------------------------
    // Stub + factory
    // ------------------------------------------------------------------------

    #[test]
    fn test_stub_accepts_everything_including_absent() {
        let rules = RuleSet::stub();
        for input in [None, Some(""), Some("SteveX"), Some("not-an-email")] {
            assert_accepted(&rules.identifier, input);
            assert_accepted(&rules.email, input);
        }
    }

    #[test]
    fn test_for_kind_selects_rule_set() {
        assert_eq!(RuleSet::for_kind(RuleSetKind::Stub).kind, RuleSetKind::Stub);
        assert_eq!(
            RuleSet::for_kind(RuleSetKind::Production).kind,
            RuleSetKind::Production
        );
    }

    #[test]
    fn test_rule_set_kind_parsing() {
        assert_eq!("stub".parse::<RuleSetKind>(), Ok(RuleSetKind::Stub));
        assert_eq!("PRD".parse::<RuleSetKind>(), Ok(RuleSetKind::Production));
        assert_eq!(
            " production ".parse::<RuleSetKind>(),
            Ok(RuleSetKind::Production)
        );
        assert!(matches!(
            "staging".parse::<RuleSetKind>(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_rule_set_kind_default_is_production() {
        assert_eq!(RuleSetKind::default(), RuleSetKind::Production);
    }
}
