//! VibeWriter Core - social post generation library.
//!
//! VibeWriter turns a campaign topic into several short, distinct social
//! media posts, each paired with an image reference.
//!
//! # Architecture
//!
//! ```text
//! Topic → Image pool (once) → per variant: Prompt → TextGenerator → Sanitize → Dedupe → JSON
//! ```
//!
//! Text and image backends are capabilities behind the [`TextGenerator`] and
//! [`ImageSource`] traits. They never fail the caller; the
//! [`VariantEngine`] always produces the requested number of variants.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vibewriter_core::{Config, VibeWriter};
//!
//! #[tokio::main]
//! async fn main() -> vibewriter_core::Result<()> {
//!     let writer = VibeWriter::new(Config::load()?)?;
//!     let result = writer.generate("Black Friday at the coffee shop", 3).await?;
//!     println!("{}", vibewriter_core::output::to_json(&result, true)?);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod engine;
pub mod error;
pub mod image;
pub mod llm;
pub mod output;
pub mod sanitize;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use engine::{EngineOptions, VariantEngine};
pub use error::{ConfigError, ProviderError, Result, VibeError};
pub use image::{ImageBank, ImageSource, ImageSourceFactory};
pub use llm::{TextGenerator, TextGeneratorFactory};
pub use output::OutputWriter;
pub use sanitize::sanitize;
pub use types::{GenerationResult, ImageResult, PostVariant};

use std::time::Duration;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VibeWriter - binds configured backends to the variant engine.
pub struct VibeWriter {
    config: Config,
    engine: VariantEngine,
    text: Box<dyn TextGenerator>,
    images: Box<dyn ImageSource>,
}

impl VibeWriter {
    /// Create a VibeWriter with backends selected by `config`.
    pub fn new(config: Config) -> Result<Self> {
        let text = TextGeneratorFactory::create(
            &config.llm.provider,
            &config.llm.model,
            &config.provider_keys(),
            &config.transport_options(),
        );
        let images = ImageSourceFactory::create(
            config.image_bank()?,
            config.unsplash_key().as_deref(),
            Duration::from_millis(config.images.timeout_ms),
        );
        Ok(Self::with_backends(config, text, images))
    }

    /// Create a VibeWriter with explicit backends.
    pub fn with_backends(
        config: Config,
        text: Box<dyn TextGenerator>,
        images: Box<dyn ImageSource>,
    ) -> Self {
        tracing::debug!("Initializing VibeWriter v{}", VERSION);
        let engine = VariantEngine::new(config.engine_options());
        Self {
            config,
            engine,
            text,
            images,
        }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate `variants` posts for `topic`.
    ///
    /// Rejects a blank topic; a zero variant count is coerced to one.
    pub async fn generate(&self, topic: &str, variants: usize) -> Result<GenerationResult> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(VibeError::InvalidInput(
                "topic must not be empty".to_string(),
            ));
        }
        Ok(self
            .engine
            .generate(
                topic,
                variants,
                self.text.as_ref(),
                self.images.as_ref(),
                self.config.general.open_links,
            )
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::SuggestionSource;
    use crate::llm::StubGenerator;

    fn offline(config: Config) -> VibeWriter {
        VibeWriter::with_backends(
            config,
            Box::new(StubGenerator::default()),
            Box::new(SuggestionSource),
        )
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_generate_offline() {
        let writer = offline(Config::default());
        let result = writer.generate("  summer smoothie launch ", 3).await.unwrap();
        assert_eq!(result.topic, "summer smoothie launch");
        assert_eq!(result.variants.len(), 3);
        assert!(result.variants.iter().all(|v| v.image_url.is_none()));
    }

    #[tokio::test]
    async fn test_generate_with_open_links() {
        let mut config = Config::default();
        config.general.open_links = true;
        let result = offline(config).generate("summer smoothie launch", 2).await.unwrap();
        assert!(result.variants.iter().all(|v| v.image_url.is_some()));
    }

    #[tokio::test]
    async fn test_blank_topic_rejected() {
        let writer = offline(Config::default());
        let err = writer.generate("   ", 3).await.unwrap_err();
        assert!(matches!(err, VibeError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_new_binds_configured_backends() {
        let mut config = Config::default();
        config.llm.provider = "stub".to_string();
        config.general.image_bank = "suggest".to_string();
        let writer = VibeWriter::new(config).unwrap();
        assert_eq!(writer.text.name(), "stub");
        assert_eq!(writer.images.name(), "suggest");
    }

    #[test]
    fn test_new_rejects_unknown_image_bank() {
        let mut config = Config::default();
        config.general.image_bank = "pexels".to_string();
        assert!(matches!(VibeWriter::new(config), Err(VibeError::Config(_))));
    }
}
