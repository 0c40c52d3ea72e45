//! Error types for steadygate operations

use thiserror::Error;

/// Configuration errors.
///
/// Every configuration problem is reported at construction time, before a
/// single request is served.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max time in nano seconds must be greater than 1")]
    TargetLatencyTooSmall,

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read config file {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Failed to parse config: {reason}")]
    ParseFailed { reason: String },
}

impl ConfigError {
    /// Shorthand for an [`ConfigError::InvalidValue`] built from displayable parts.
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Master error type for all steadygate errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Telemetry error: {reason}")]
    Telemetry { reason: String },
}

/// Result type alias for steadygate operations.
pub type GateResult<T> = Result<T, GateError>;

// =============================================================================
// TESTS
// =============================================================================
