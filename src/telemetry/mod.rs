//! Logging initialisation.
//!
//! Installs a `tracing` subscriber with an `EnvFilter` (from `RUST_LOG`,
//! default `info`) and either human-readable or JSON output.
//!
//! | Setting | Description | Default |
//! |---------|-------------|---------|
//! | `LOGGING__FORMAT` | `text` or `json` | `text` |
//! | `RUST_LOG` | filter directives | `info` |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Result type for telemetry operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Telemetry-specific error type
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Unsupported log format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> TelemetryResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(TelemetryError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Initialize the global tracing subscriber.
pub fn init_telemetry(config: &LoggingConfig) -> TelemetryResult<()> {
    let format = LogFormat::parse(&config.format)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::info!(format = ?format, "Tracing initialized");
    Ok(())
}
