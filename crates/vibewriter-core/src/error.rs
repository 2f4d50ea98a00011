//! Error types for VibeWriter.
//!
//! Generation itself is total: backend misbehavior is absorbed inside the
//! capabilities and the variant engine. The errors here cover configuration,
//! caller input, output I/O, and the transport failures that credentialed
//! backends classify internally before degrading to a message string.

use thiserror::Error;

/// Top-level error type for VibeWriter operations.
#[derive(Error, Debug)]
pub enum VibeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Caller input rejected before reaching the engine
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Failed to load .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// Transport-level failures inside a credentialed backend.
///
/// Never crosses the `TextGenerator` or `ImageSource` boundary: backends
/// retry what is retryable and turn the rest into a degraded result.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Request could not be sent or the backend answered with an error status
    #[error("{message}")]
    Http {
        message: String,
        status_code: Option<u16>,
    },

    /// Request exceeded the per-call timeout
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Response body could not be decoded
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Backend answered successfully but produced no text
    #[error("empty response")]
    Empty,
}

impl ProviderError {
    /// Map a reqwest failure, keeping timeouts distinguishable for retry.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_ms }
        } else {
            Self::Http {
                message: err.to_string(),
                status_code: err.status().map(|s| s.as_u16()),
            }
        }
    }
}

/// Convenience type alias for VibeWriter results.
pub type Result<T> = std::result::Result<T, VibeError>;
