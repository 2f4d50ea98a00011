//! CLI enum types for the generate command: LLM provider and image bank.

use clap::ValueEnum;
use vibewriter_core::ImageBank as CoreImageBank;

/// Supported LLM providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LlmProvider {
    /// Google Gemini (stub caption without a key)
    #[value(alias = "gemini")]
    Google,
    /// OpenAI API
    Openai,
    /// Anthropic API
    #[value(alias = "claude")]
    Anthropic,
    /// Offline stub, no network
    Stub,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::Google => write!(f, "google"),
            LlmProvider::Openai => write!(f, "openai"),
            LlmProvider::Anthropic => write!(f, "anthropic"),
            LlmProvider::Stub => write!(f, "stub"),
        }
    }
}

/// Supported image sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImageBank {
    /// Unsplash search (falls back to suggestions without a key)
    Unsplash,
    /// Deterministic placeholder suggestions
    Suggest,
}

impl From<ImageBank> for CoreImageBank {
    fn from(bank: ImageBank) -> Self {
        match bank {
            ImageBank::Unsplash => CoreImageBank::Unsplash,
            ImageBank::Suggest => CoreImageBank::Suggest,
        }
    }
}
