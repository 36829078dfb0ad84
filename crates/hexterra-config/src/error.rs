//! Configuration error types.

use hexterra_metrics::MetricsError;

/// Errors that can occur when loading, saving, or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// The metrics section describes geometry that cannot be built.
    #[error("invalid metrics: {0}")]
    InvalidMetrics(#[from] MetricsError),

    /// A grid or noise setting is out of range.
    #[error("invalid setting `{0}`: {1}")]
    InvalidSetting(&'static str, String),
}
