//! Image lookup capability and the factory that binds a mode.

use crate::types::ImageResult;
use async_trait::async_trait;
use std::time::Duration;

/// Trait that all image sources implement.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Return up to `limit` image references for `query`.
    ///
    /// With `open_links = false` no real URLs are emitted. Never fails; an
    /// unusable backend yields placeholder suggestions instead.
    async fn search(&self, query: &str, limit: usize, open_links: bool) -> Vec<ImageResult>;
}

/// Image source mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageBank {
    /// Credentialed Unsplash search (link-resolving)
    #[default]
    Unsplash,
    /// Key-free deterministic suggestions (suggestion-only)
    Suggest,
}

impl ImageBank {
    /// Parse a mode identifier (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "unsplash" => Some(Self::Unsplash),
            "suggest" | "suggestion" => Some(Self::Suggest),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unsplash => "unsplash",
            Self::Suggest => "suggest",
        }
    }
}

impl std::fmt::Display for ImageBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Factory that creates the image source for a mode.
pub struct ImageSourceFactory;

impl ImageSourceFactory {
    /// Create an image source.
    ///
    /// # Arguments
    /// * `bank` - Source mode
    /// * `access_key` - Unsplash access key; ignored in suggestion mode
    /// * `timeout` - Per-request timeout for the link-resolving source
    pub fn create(
        bank: ImageBank,
        access_key: Option<&str>,
        timeout: Duration,
    ) -> Box<dyn ImageSource> {
        match bank {
            ImageBank::Unsplash => Box::new(super::unsplash::UnsplashSource::new(
                access_key, timeout,
            )),
            ImageBank::Suggest => Box::new(super::suggestion::SuggestionSource),
        }
    }
}
