//! Configuration types
//!
//! Loaded once at start-up from a TOML file or from environment variables,
//! then validated before anything is constructed from it.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::rules::RuleSetKind;

/// Env var naming a TOML config file.
pub const CONFIG_PATH_ENV: &str = "STEADYGATE_CONFIG";

const RULE_SET_ENV: &str = "STEADYGATE_RULE_SET";
const TARGET_LATENCY_ENV: &str = "STEADYGATE_TARGET_LATENCY_NANOS";
const CACHE_TTL_ENV: &str = "STEADYGATE_CACHE_TTL_SECONDS";
const CACHE_MAX_ENTRIES_ENV: &str = "STEADYGATE_CACHE_MAX_ENTRIES";

/// Padded latency for every validation call: 10 ms.
pub const DEFAULT_TARGET_LATENCY_NANOS: u64 = 10_000_000;

/// Cached outcomes live for 10 seconds from their write.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 10;

/// Per-namespace cache capacity.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

// ============================================================================
// GATE CONFIGURATION
// ============================================================================

/// Composition-time settings for the validation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Which rule set is active.
    #[serde(default)]
    pub rule_set_kind: RuleSetKind,
    /// Minimum wall-clock duration of every validation call, in nanoseconds.
    pub target_latency_nanos: u64,
    /// Lifetime of a cached outcome, measured from its write.
    pub cache_ttl_seconds: u64,
    /// Maximum entries held per validator kind.
    pub cache_max_entries: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            rule_set_kind: RuleSetKind::Production,
            target_latency_nanos: DEFAULT_TARGET_LATENCY_NANOS,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

impl GateConfig {
    /// Load configuration for a running service.
    ///
    /// Reads the file named by `STEADYGATE_CONFIG` when set, otherwise
    /// builds from environment variables. The result is always validated.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(Path::new(path.trim()))?,
            _ => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Does not validate.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse TOML text. Does not validate.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })
    }

    /// Defaults overridden by environment variables.
    ///
    /// Environment variables:
    /// - `STEADYGATE_RULE_SET`: `stub` or `production` (default: production)
    /// - `STEADYGATE_TARGET_LATENCY_NANOS`: padded latency (default: 10000000)
    /// - `STEADYGATE_CACHE_TTL_SECONDS`: cache TTL (default: 10)
    /// - `STEADYGATE_CACHE_MAX_ENTRIES`: per-namespace capacity (default: 10000)
    ///
    /// A variable that is set but unparsable is an error, not a silent default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`GateConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            rule_set_kind: parse_var(&lookup, RULE_SET_ENV, "rule_set_kind")?
                .unwrap_or(defaults.rule_set_kind),
            target_latency_nanos: parse_var(&lookup, TARGET_LATENCY_ENV, "target_latency_nanos")?
                .unwrap_or(defaults.target_latency_nanos),
            cache_ttl_seconds: parse_var(&lookup, CACHE_TTL_ENV, "cache_ttl_seconds")?
                .unwrap_or(defaults.cache_ttl_seconds),
            cache_max_entries: parse_var(&lookup, CACHE_MAX_ENTRIES_ENV, "cache_max_entries")?
                .unwrap_or(defaults.cache_max_entries),
        })
    }

    /// Validate the configuration.
    ///
    /// Validates:
    /// - target_latency_nanos >= 1
    /// - cache_ttl_seconds > 0
    /// - cache_max_entries > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_latency_nanos < 1 {
            return Err(ConfigError::TargetLatencyTooSmall);
        }

        if self.cache_ttl_seconds == 0 {
            return Err(ConfigError::invalid_value(
                "cache_ttl_seconds",
                self.cache_ttl_seconds,
                "cache_ttl_seconds must be positive",
            ));
        }

        if self.cache_max_entries == 0 {
            return Err(ConfigError::invalid_value(
                "cache_max_entries",
                self.cache_max_entries,
                "cache_max_entries must be positive",
            ));
        }

        Ok(())
    }

    pub fn target_latency(&self) -> Duration {
        Duration::from_nanos(self.target_latency_nanos)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

fn parse_var<T, F>(lookup: &F, name: &str, field: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::invalid_value(field, &raw, format!("{} is not a valid value", name))
        }),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = GateConfig::default();
        assert_eq!(config.rule_set_kind, RuleSetKind::Production);
        assert_eq!(config.target_latency_nanos, 10_000_000);
        assert_eq!(config.cache_ttl_seconds, 10);
        assert_eq!(config.cache_max_entries, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_target() {
        let config = GateConfig {
            target_latency_nanos: 0,
            ..GateConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TargetLatencyTooSmall));
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = GateConfig {
            cache_ttl_seconds: 0,
            ..GateConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cache_ttl_seconds"));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = GateConfig {
            cache_max_entries: 0,
            ..GateConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cache_max_entries"));
    }

    #[test]
    fn test_duration_accessors() {
        let config = GateConfig::default();
        assert_eq!(config.target_latency(), Duration::from_millis(10));
        assert_eq!(config.cache_ttl(), Duration::from_secs(10));
    }

    #[test]
    fn test_from_lookup_uses_defaults_when_unset() {
        let config = GateConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, GateConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = GateConfig::from_lookup(lookup_from(&[
            ("STEADYGATE_RULE_SET", "stub"),
            ("STEADYGATE_TARGET_LATENCY_NANOS", "5000000"),
            ("STEADYGATE_CACHE_TTL_SECONDS", " 30 "),
            ("STEADYGATE_CACHE_MAX_ENTRIES", "64"),
        ]))
        .unwrap();

        assert_eq!(config.rule_set_kind, RuleSetKind::Stub);
        assert_eq!(config.target_latency_nanos, 5_000_000);
        assert_eq!(config.cache_ttl_seconds, 30);
        assert_eq!(config.cache_max_entries, 64);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = GateConfig::from_lookup(lookup_from(&[(
            "STEADYGATE_TARGET_LATENCY_NANOS",
            "-5",
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "target_latency_nanos"
        ));

        let err =
            GateConfig::from_lookup(lookup_from(&[("STEADYGATE_RULE_SET", "qa")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_from_toml_str() {
        let config = GateConfig::from_toml_str(
            r#"
            rule_set_kind = "prd"
            target_latency_nanos = 5000000
            cache_ttl_seconds = 10
            cache_max_entries = 10000
            "#,
        )
        .unwrap();

        assert_eq!(config.rule_set_kind, RuleSetKind::Production);
        assert_eq!(config.target_latency_nanos, 5_000_000);
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_fields() {
        let err = GateConfig::from_toml_str(
            r#"
            target_latency_nanos = 1
            cache_ttl_seconds = 1
            cache_max_entries = 1
            cache_flavour = "lru"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
    }

    #[test]
    fn test_from_path_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "rule_set_kind = \"stub\"\n\
             target_latency_nanos = 1\n\
             cache_ttl_seconds = 1\n\
             cache_max_entries = 1"
        )
        .unwrap();

        let config = GateConfig::from_path(file.path()).unwrap();
        assert_eq!(config.rule_set_kind, RuleSetKind::Stub);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = GateConfig::from_path(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }
}
