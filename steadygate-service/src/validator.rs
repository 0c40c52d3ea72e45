//! The validator facade.

use std::fmt;
use std::sync::Arc;

use steadygate_cache::{CacheNamespace, ResultCache};
use steadygate_core::{
    ConfigError, Outcome, TracingObserver, ValidationObserver, ValidatorKind, ValueValidator,
};
use steadygate_latency::{LatencyPadder, PaddingSleeper, ThreadSleeper};

/// One validator kind behind the constant-latency wrapper.
///
/// Every call, whether answered from the cache or evaluated fresh, runs
/// inside the padder and so takes at least the target latency. Absent
/// input is never cached; it is evaluated on every call.
pub struct Validator<S = ThreadSleeper> {
    kind: ValidatorKind,
    namespace: CacheNamespace,
    rules: ValueValidator,
    cache: Arc<ResultCache<Outcome>>,
    padder: LatencyPadder<S>,
    observer: Arc<dyn ValidationObserver>,
}

impl Validator<ThreadSleeper> {
    /// Validator padding every call to `target_nanos` with a thread sleep.
    ///
    /// # Errors
    /// [`ConfigError::TargetLatencyTooSmall`] when `target_nanos` is 0.
    pub fn new(
        kind: ValidatorKind,
        rules: ValueValidator,
        cache: Arc<ResultCache<Outcome>>,
        target_nanos: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self::with_padder(
            kind,
            rules,
            cache,
            LatencyPadder::new(target_nanos)?,
        ))
    }
}

impl<S: PaddingSleeper> Validator<S> {
    pub fn with_padder(
        kind: ValidatorKind,
        rules: ValueValidator,
        cache: Arc<ResultCache<Outcome>>,
        padder: LatencyPadder<S>,
    ) -> Self {
        Self {
            kind,
            namespace: CacheNamespace::from(kind),
            rules,
            cache,
            padder,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the default [`TracingObserver`].
    pub fn with_observer(mut self, observer: Arc<dyn ValidationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn kind(&self) -> ValidatorKind {
        self.kind
    }

    pub fn namespace(&self) -> &CacheNamespace {
        &self.namespace
    }

    pub fn padder(&self) -> &LatencyPadder<S> {
        &self.padder
    }

    /// Classify `input`. Never fails and never returns before the target.
    pub fn validate(&self, input: Option<&str>) -> Outcome {
        self.padder.run(|| {
            self.observer.checking(self.kind, input);

            let outcome = match input {
                Some(key) => self
                    .cache
                    .get_or_compute(&self.namespace, key, || self.rules.evaluate(input)),
                None => self.rules.evaluate(None),
            };

            self.observer.checked(self.kind, input, &outcome);
            outcome
        })
    }
}

impl<S> fmt::Debug for Validator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("kind", &self.kind)
            .field("namespace", &self.namespace)
            .field("rules", &self.rules)
            .field("target", &self.padder.target())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================
