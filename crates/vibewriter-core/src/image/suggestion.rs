//! Key-free image suggestions.
//!
//! Picks generic marketing-image queries from a fixed vocabulary. The pick is
//! seeded by a BLAKE3 hash of the query, so the same query and limit always
//! produce the same suggestions.

use super::source::ImageSource;
use crate::types::ImageResult;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Generic marketing-image queries offered as placeholders.
pub const SUGGESTIONS: [&str; 6] = [
    "product flatlay",
    "happy customers",
    "lifestyle coffee shop",
    "discount banner",
    "seasonal promo graphic",
    "close-up espresso",
];

/// Deterministic suggestion-only image source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionSource;

impl SuggestionSource {
    /// Suggestions for `query`, shared with the Unsplash fallback path.
    pub fn suggest(query: &str, limit: usize, open_links: bool) -> Vec<ImageResult> {
        let hash = blake3::hash(query.as_bytes());
        let hash_bytes = hash.as_bytes();
        let seed_value = u64::from_le_bytes(hash_bytes[..8].try_into().unwrap_or([0u8; 8]));
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed_value);

        let k = limit.min(SUGGESTIONS.len());
        SUGGESTIONS
            .choose_multiple(&mut rng, k)
            .map(|pick| {
                let url = open_links.then(|| placeholder_url(pick));
                ImageResult::new(*pick, url)
            })
            .collect()
    }
}

/// Key-free placeholder image for a suggestion.
fn placeholder_url(pick: &str) -> String {
    // Vocabulary is plain ASCII; only spaces need encoding.
    format!("https://picsum.photos/seed/{}/800/600", pick.replace(' ', "+"))
}

#[async_trait]
impl ImageSource for SuggestionSource {
    fn name(&self) -> &str {
        "suggest"
    }

    async fn search(&self, query: &str, limit: usize, open_links: bool) -> Vec<ImageResult> {
        Self::suggest(query, limit, open_links)
    }
}
