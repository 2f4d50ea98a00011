//! Text generation backends.
//!
//! Provides the [`TextGenerator`] capability over multiple backends (Gemini,
//! OpenAI, Anthropic, offline stub) plus transport-level retry helpers.

pub(crate) mod anthropic;
pub(crate) mod gemini;
pub(crate) mod openai;
pub(crate) mod provider;
pub(crate) mod retry;
pub(crate) mod stub;

pub use anthropic::AnthropicGenerator;
pub use gemini::GeminiGenerator;
pub use openai::OpenAiGenerator;
pub use provider::{
    resolve_env_var, ProviderKeys, ProviderKind, TextGenerator, TextGeneratorFactory,
    TransportOptions,
};
pub use retry::RetryPolicy;
pub use stub::{StubGenerator, STUB_CAPTION};
