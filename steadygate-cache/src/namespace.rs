//! Cache partition names.

use std::borrow::Cow;
use std::fmt;

use steadygate_core::ValidatorKind;

/// Name of an isolated cache partition.
///
/// Every lookup goes through a namespace, so two validator kinds can hold
/// the same key without seeing each other's outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheNamespace {
    name: Cow<'static, str>,
}

impl CacheNamespace {
    pub const EMAIL: CacheNamespace = CacheNamespace::from_static("email");
    pub const IDENTIFIER: CacheNamespace = CacheNamespace::from_static("identifier");

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl From<ValidatorKind> for CacheNamespace {
    fn from(kind: ValidatorKind) -> Self {
        Self::from_static(kind.as_str())
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
