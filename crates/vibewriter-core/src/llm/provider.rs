//! Text generation capability and the factory that binds a backend.
//!
//! Every backend implements [`TextGenerator`]. Implementations never return
//! an error: a missing credential, transport failure, or malformed response
//! comes back as a descriptive string, so the variant engine can treat the
//! result like any other (possibly useless) caption.

use async_trait::async_trait;
use std::time::Duration;

use super::retry::RetryPolicy;

/// Trait that all text generation backends implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the engine holds a `&dyn TextGenerator`).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name for logging (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Generate freeform text for `prompt`, bounded by `max_tokens`.
    ///
    /// Failures are encoded in the returned string.
    async fn generate_text(&self, prompt: &str, max_tokens: u32) -> String;
}

/// Credentials per provider, as resolved from config or the environment.
#[derive(Debug, Clone, Default)]
pub struct ProviderKeys {
    pub google: Option<String>,
    pub openai: Option<String>,
    pub anthropic: Option<String>,
}

/// Transport settings shared by the credentialed backends.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// Retry policy for transient failures
    pub retry: RetryPolicy,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// Known text generation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
    Anthropic,
    Stub,
}

impl ProviderKind {
    /// Parse a provider identifier (case-insensitive).
    ///
    /// Unknown identifiers fall back to Gemini, which itself degrades to a
    /// stub caption when no key is configured.
    pub fn parse(provider: &str) -> Self {
        match provider.trim().to_lowercase().as_str() {
            "google" | "gemini" => Self::Gemini,
            "openai" => Self::OpenAi,
            "anthropic" | "claude" => Self::Anthropic,
            "stub" | "offline" => Self::Stub,
            other => {
                tracing::warn!("Unknown LLM provider '{other}', falling back to gemini");
                Self::Gemini
            }
        }
    }

    /// Model used when the caller does not name one.
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-1.5-flash",
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-3-haiku-20240307",
            Self::Stub => "stub",
        }
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    } else if value.trim().is_empty() {
        None
    } else {
        Some(value.trim().to_string())
    }
}

/// Factory that creates the text generator for a provider identifier.
pub struct TextGeneratorFactory;

impl TextGeneratorFactory {
    /// Create a text generator.
    ///
    /// # Arguments
    /// * `provider` - Provider identifier ("google", "openai", "anthropic", "stub")
    /// * `model` - Model name; empty selects the provider default
    /// * `keys` - Credentials; a missing key yields a degraded backend, not an error
    /// * `transport` - Timeout and retry settings for networked backends
    pub fn create(
        provider: &str,
        model: &str,
        keys: &ProviderKeys,
        transport: &TransportOptions,
    ) -> Box<dyn TextGenerator> {
        let kind = ProviderKind::parse(provider);
        let model = match model.trim() {
            "" => kind.default_model(),
            m => m,
        };
        tracing::debug!("Binding text generator {kind:?} with model {model}");

        match kind {
            ProviderKind::Gemini => Box::new(super::gemini::GeminiGenerator::new(
                keys.google.as_deref(),
                model,
                transport.clone(),
            )),
            ProviderKind::OpenAi => Box::new(super::openai::OpenAiGenerator::new(
                keys.openai.as_deref(),
                model,
                transport.clone(),
            )),
            ProviderKind::Anthropic => Box::new(super::anthropic::AnthropicGenerator::new(
                keys.anthropic.as_deref(),
                model,
                transport.clone(),
            )),
            ProviderKind::Stub => Box::new(super::stub::StubGenerator::default()),
        }
    }
}
