//! Tracing subscriber initialisation.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use steadygate_core::{GateError, GateResult};

const LOG_JSON_ENV: &str = "STEADYGATE_LOG_JSON";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "steadygate=info";

/// Telemetry configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
    /// EnvFilter directives applied when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json: false,
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Environment variables:
    /// - `STEADYGATE_LOG_JSON`: `true` or `1` for JSON output (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            json: lookup(LOG_JSON_ENV)
                .map(|s| s == "true" || s == "1")
                .unwrap_or(false),
            ..Self::default()
        }
    }
}

/// Install the global tracing subscriber.
///
/// Call once at start-up. A second call returns [`GateError::Telemetry`].
pub fn init_tracing(config: &TelemetryConfig) -> GateResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| GateError::Telemetry {
        reason: format!("Failed to init subscriber: {}", e),
    })?;

    tracing::info!(json = config.json, "Telemetry initialized");
    Ok(())
}
