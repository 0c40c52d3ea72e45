use std::time::Duration;

use steadygate_core::{ConfigError, GateConfig};

/// Capacity and lifetime settings for one cache namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceConfig {
    /// How long an entry stays readable after its write.
    pub ttl: Duration,
    /// Maximum number of entries held at once.
    pub max_entries: usize,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10),
            max_entries: 10_000,
        }
    }
}

impl NamespaceConfig {
    /// Create a namespace config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache settings from a gate configuration.
    pub fn from_gate_config(config: &GateConfig) -> Self {
        Self {
            ttl: config.cache_ttl(),
            max_entries: config.cache_max_entries,
        }
    }

    /// Set the entry TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the max entries.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Both limits must be positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl.is_zero() {
            return Err(ConfigError::invalid_value(
                "ttl",
                format!("{:?}", self.ttl),
                "cache TTL must be positive",
            ));
        }

        if self.max_entries == 0 {
            return Err(ConfigError::invalid_value(
                "max_entries",
                self.max_entries,
                "cache capacity must be positive",
            ));
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NamespaceConfig::new();
        assert_eq!(config.ttl, Duration::from_secs(10));
        assert_eq!(config.max_entries, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = NamespaceConfig::new()
            .with_ttl(Duration::from_millis(250))
            .with_max_entries(3);
        assert_eq!(config.ttl, Duration::from_millis(250));
        assert_eq!(config.max_entries, 3);
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let err = NamespaceConfig::new()
            .with_ttl(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "ttl"));

        let err = NamespaceConfig::new()
            .with_max_entries(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "max_entries"
        ));
    }

    #[test]
    fn test_from_gate_config() {
        let gate = GateConfig {
            cache_ttl_seconds: 30,
            cache_max_entries: 64,
            ..GateConfig::default()
        };
        let config = NamespaceConfig::from_gate_config(&gate);
        assert_eq!(config.ttl, Duration::from_secs(30));
        assert_eq!(config.max_entries, 64);
    }
}
