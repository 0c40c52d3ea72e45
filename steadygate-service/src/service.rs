//! Composition root.
//!
//! Resolves the rule set, cache and latency target from a [`GateConfig`]
//! once, at start-up. Nothing is re-read or re-selected per request.

use std::sync::Arc;
use std::time::Duration;

use steadygate_cache::{CacheNamespace, Clock, MonotonicClock, NamespaceConfig, ResultCache};
use steadygate_core::{
    ConfigError, GateConfig, Outcome, RuleSet, RuleSetKind, TracingObserver, ValidationObserver,
    ValidatorKind,
};
use steadygate_latency::{LatencyPadder, PaddingSleeper, ThreadSleeper};
use tracing::info;

use crate::validator::Validator;

/// The email and identifier validators, sharing one cache and one target.
#[derive(Debug)]
pub struct ValidationService<S = ThreadSleeper> {
    rule_set_kind: RuleSetKind,
    target_latency: Duration,
    cache: Arc<ResultCache<Outcome>>,
    email: Validator<S>,
    identifier: Validator<S>,
}

impl ValidationService<ThreadSleeper> {
    /// Build the service with the default sleeper, observer and clock.
    pub fn from_config(config: &GateConfig) -> Result<Self, ConfigError> {
        ValidationServiceBuilder::new(config.clone()).build()
    }

    /// Build the service from [`GateConfig::load`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_config(&GateConfig::load()?)
    }

    pub fn builder(config: GateConfig) -> ValidationServiceBuilder<ThreadSleeper> {
        ValidationServiceBuilder::new(config)
    }
}

impl<S: PaddingSleeper> ValidationService<S> {
    /// Validate `input` as `kind`.
    pub fn validate(&self, kind: ValidatorKind, input: Option<&str>) -> Outcome {
        self.validator(kind).validate(input)
    }

    pub fn validate_email(&self, input: Option<&str>) -> Outcome {
        self.email.validate(input)
    }

    pub fn validate_identifier(&self, input: Option<&str>) -> Outcome {
        self.identifier.validate(input)
    }

    pub fn validator(&self, kind: ValidatorKind) -> &Validator<S> {
        match kind {
            ValidatorKind::Email => &self.email,
            ValidatorKind::Identifier => &self.identifier,
        }
    }

    pub fn rule_set_kind(&self) -> RuleSetKind {
        self.rule_set_kind
    }

    pub fn target_latency(&self) -> Duration {
        self.target_latency
    }

    pub fn cache(&self) -> &Arc<ResultCache<Outcome>> {
        &self.cache
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Assembles a [`ValidationService`] with optional replacement parts.
pub struct ValidationServiceBuilder<S = ThreadSleeper> {
    config: GateConfig,
    sleeper: S,
    observer: Arc<dyn ValidationObserver>,
    clock: Arc<dyn Clock>,
}

impl ValidationServiceBuilder<ThreadSleeper> {
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            sleeper: ThreadSleeper,
            observer: Arc::new(TracingObserver),
            clock: Arc::new(MonotonicClock),
        }
    }
}

impl<S> ValidationServiceBuilder<S> {
    /// Sleeper shared by both validators.
    pub fn with_sleeper<T>(self, sleeper: T) -> ValidationServiceBuilder<T> {
        ValidationServiceBuilder {
            config: self.config,
            sleeper,
            observer: self.observer,
            clock: self.clock,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ValidationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Clock used for cache TTL.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl<S: PaddingSleeper + Clone> ValidationServiceBuilder<S> {
    /// Validate the configuration and wire everything together.
    ///
    /// # Errors
    /// Any [`ConfigError`] from [`GateConfig::validate`].
    pub fn build(self) -> Result<ValidationService<S>, ConfigError> {
        let config = self.config;
        config.validate()?;

        let cache_config = NamespaceConfig::from_gate_config(&config);
        let cache = Arc::new(ResultCache::with_clock(cache_config.clone(), self.clock)?);
        cache.register(CacheNamespace::EMAIL, cache_config.clone())?;
        cache.register(CacheNamespace::IDENTIFIER, cache_config)?;

        let RuleSet {
            kind,
            identifier,
            email,
        } = RuleSet::for_kind(config.rule_set_kind);

        let email = Validator::with_padder(
            ValidatorKind::Email,
            email,
            Arc::clone(&cache),
            LatencyPadder::with_sleeper(config.target_latency_nanos, self.sleeper.clone())?,
        )
        .with_observer(Arc::clone(&self.observer));

        let identifier = Validator::with_padder(
            ValidatorKind::Identifier,
            identifier,
            Arc::clone(&cache),
            LatencyPadder::with_sleeper(config.target_latency_nanos, self.sleeper)?,
        )
        .with_observer(self.observer);

        info!(
            rule_set = kind.as_str(),
            target_latency_nanos = config.target_latency_nanos,
            cache_ttl_seconds = config.cache_ttl_seconds,
            cache_max_entries = config.cache_max_entries,
            "Validation service composed"
        );

        Ok(ValidationService {
            rule_set_kind: kind,
            target_latency: config.target_latency(),
            cache,
            email,
            identifier,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
