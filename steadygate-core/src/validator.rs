//! Maps a rule verdict onto one of two fixed outcomes.

use std::borrow::Cow;
use std::fmt;

use crate::rule::Rule;
use crate::Outcome;

/// Evaluates a composed [`Rule`] and returns the accepted outcome or the
/// rule set's rejected outcome.
///
/// Both outcomes are built once at construction and cloned per call, so
/// identical inputs always produce identical outcomes.
pub struct ValueValidator {
    rule: Box<dyn Rule>,
    accepted: Outcome,
    rejected: Outcome,
}

impl ValueValidator {
    /// Create a validator that rejects with `reason` when `rule` fails.
    pub fn new<R>(rule: R, reason: impl Into<Cow<'static, str>>) -> Self
    where
        R: Rule + 'static,
    {
        Self {
            rule: Box::new(rule),
            accepted: Outcome::accepted(),
            rejected: Outcome::rejected(reason),
        }
    }

    /// Classify the input. Never fails; absent input is handed to the rule.
    pub fn evaluate(&self, input: Option<&str>) -> Outcome {
        if self.rule.test(input) {
            self.accepted.clone()
        } else {
            self.rejected.clone()
        }
    }

    /// The reason carried by every rejection from this validator.
    pub fn rejection_reason(&self) -> &str {
        self.rejected.reason().unwrap_or_default()
    }
}

impl fmt::Debug for ValueValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueValidator")
            .field("rejection_reason", &self.rejection_reason())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn only_abc(candidate: Option<&str>) -> bool {
        candidate == Some("abc")
    }

    #[test]
    fn test_evaluate_maps_pass_to_accepted() {
        let validator = ValueValidator::new(only_abc, "not abc");
        assert_eq!(validator.evaluate(Some("abc")), Outcome::accepted());
    }

    #[test]
    fn test_evaluate_maps_fail_to_rejected() {
        let validator = ValueValidator::new(only_abc, "not abc");
        let outcome = validator.evaluate(Some("abd"));
        assert!(!outcome.is_acceptable());
        assert_eq!(outcome.reason(), Some("not abc"));
    }

    #[test]
    fn test_absent_input_reaches_rule() {
        let validator = ValueValidator::new(
            |candidate: Option<&str>| candidate.is_none(),
            "present",
        );
        assert!(validator.evaluate(None).is_acceptable());
        assert!(!validator.evaluate(Some("")).is_acceptable());
    }

    #[test]
    fn test_rejection_reason() {
        let validator = ValueValidator::new(only_abc, "not abc");
        assert_eq!(validator.rejection_reason(), "not abc");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Property: evaluation is deterministic for a fixed rule set.
        #[test]
        fn prop_evaluate_is_deterministic(input in proptest::option::of(".{0,40}")) {
            let rules = crate::RuleSet::production();
            let first = rules.identifier.evaluate(input.as_deref());
            let second = rules.identifier.evaluate(input.as_deref());
            prop_assert_eq!(first, second);

            let first = rules.email.evaluate(input.as_deref());
            let second = rules.email.evaluate(input.as_deref());
            prop_assert_eq!(first, second);
        }

        /// Property: a reason is present exactly when the outcome is unacceptable.
        #[test]
        fn prop_reason_present_iff_rejected(input in proptest::option::of(".{0,40}")) {
            let rules = crate::RuleSet::production();
            for outcome in [
                rules.identifier.evaluate(input.as_deref()),
                rules.email.evaluate(input.as_deref()),
            ] {
                prop_assert_eq!(outcome.reason().is_some(), !outcome.is_acceptable());
            }
        }
    }
}
