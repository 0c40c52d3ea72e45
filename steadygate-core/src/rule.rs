//! Rule predicates and their composition.
//!
//! A [`Rule`] classifies a candidate string. Absent input (`None`) is a
//! normal candidate, never an error: each rule decides what it means.

use std::fmt;

/// A pure, deterministic predicate over an optional input string.
///
/// Plain functions and closures of shape `Fn(Option<&str>) -> bool` are rules.
pub trait Rule: Send + Sync {
    /// Returns true when the candidate satisfies this rule.
    fn test(&self, candidate: Option<&str>) -> bool;

    /// Logical AND with another rule; `self` is evaluated first.
    fn and<R>(self, other: R) -> And<Self, R>
    where
        Self: Sized,
        R: Rule,
    {
        And {
            first: self,
            second: other,
        }
    }
}

impl<F> Rule for F
where
    F: Fn(Option<&str>) -> bool + Send + Sync,
{
    fn test(&self, candidate: Option<&str>) -> bool {
        self(candidate)
    }
}

/// Two rules joined by logical AND. Built by [`Rule::and`].
#[derive(Debug, Clone, Copy)]
pub struct And<A, B> {
    first: A,
    second: B,
}

impl<A: Rule, B: Rule> Rule for And<A, B> {
    fn test(&self, candidate: Option<&str>) -> bool {
        self.first.test(candidate) && self.second.test(candidate)
    }
}

/// An ordered list of rules that must all pass.
///
/// An empty list accepts everything.
#[derive(Default)]
pub struct AllOf {
    rules: Vec<Box<dyn Rule>>,
}

impl AllOf {
    /// Create an empty conjunction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to the end of the chain.
    pub fn with<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of sub-rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Rule for AllOf {
    fn test(&self, candidate: Option<&str>) -> bool {
        self.rules.iter().all(|rule| rule.test(candidate))
    }
}

impl fmt::Debug for AllOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllOf")
            .field("rules", &self.rules.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
