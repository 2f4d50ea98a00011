//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// General request defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Number of variants when the caller does not say
    pub variants: usize,

    /// Emit resolvable image URLs
    pub open_links: bool,

    /// Image source mode: "unsplash" or "suggest"
    pub image_bank: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            variants: 3,
            open_links: false,
            image_bank: "unsplash".to_string(),
        }
    }
}

/// Variant engine limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Character ceiling for every caption
    pub max_chars: usize,

    /// Ceiling for the generic fallback caption
    pub fallback_max_chars: usize,

    /// Diversified attempts per variant
    pub attempts: u32,

    /// Token budget for diversified prompts
    pub max_tokens: u32,

    /// Token budget for the fallback prompt
    pub fallback_max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_chars: 220,
            fallback_max_chars: 210,
            attempts: 4,
            max_tokens: 140,
            fallback_max_tokens: 120,
        }
    }
}

/// Text generation backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider identifier: google, openai, anthropic, stub
    pub provider: String,

    /// Model name; empty selects the provider default
    pub model: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Retries for transient failures
    pub retry_attempts: u32,

    /// Base backoff between retries in milliseconds
    pub retry_delay_ms: u64,

    /// Google Gemini API key (supports ${ENV_VAR} syntax)
    pub google_api_key: String,

    /// OpenAI API key (supports ${ENV_VAR} syntax)
    pub openai_api_key: String,

    /// Anthropic API key (supports ${ENV_VAR} syntax)
    pub anthropic_api_key: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "google".to_string(),
            model: String::new(),
            timeout_ms: 10_000,
            retry_attempts: 2,
            retry_delay_ms: 500,
            google_api_key: "${GOOGLE_API_KEY}".to_string(),
            openai_api_key: "${OPENAI_API_KEY}".to_string(),
            anthropic_api_key: "${ANTHROPIC_API_KEY}".to_string(),
        }
    }
}

/// Image source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Unsplash access key (supports ${ENV_VAR} syntax)
    pub unsplash_access_key: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            unsplash_access_key: "${UNSPLASH_ACCESS_KEY}".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output (2-space indent)
    pub pretty: bool,

    /// Default output file; stdout when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            path: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
