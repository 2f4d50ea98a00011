//! Variant engine: one topic in, N distinct post variants out.
//!
//! Each slot rotates through style cues and variation instructions until the
//! backend produces a caption whose fingerprint has not been seen in this
//! request. A backend that keeps repeating itself gets a generic retry with a
//! slot tag, and a final guard appends a bounded chain of disambiguating
//! suffixes. Images come from a pool fetched once and reused cyclically.

use std::collections::HashSet;

use crate::image::ImageSource;
use crate::llm::TextGenerator;
use crate::sanitize::{fingerprint, sanitize, truncate};
use crate::types::{GenerationResult, ImageResult, PostVariant};

/// Tone cues, one per slot (cycled).
pub const STYLE_CUES: [&str; 10] = [
    "upbeat and witty tone",
    "informative and value-focused tone",
    "playful with emoji",
    "urgent, limited-time offer tone",
    "community-focused, inclusive tone",
    "minimalist, sleek tone",
    "friendly conversational tone",
    "trend-savvy, Gen Z tone",
    "professional, concise tone",
    "storytelling hook in first sentence",
];

/// Variation instructions, one per attempt (cycled).
pub const ALT_INSTRUCTIONS: [&str; 4] = [
    "vary hashtags and CTA",
    "avoid repeating earlier wording",
    "use a different angle or benefit",
    "use different emoji (max 2)",
];

/// Suffixes tried by the uniqueness guard.
const GUARD_SUFFIXES: usize = 4;

/// Tunable limits for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Character ceiling for every emitted caption
    pub max_chars: usize,
    /// Ceiling for the generic fallback caption, before its slot tag
    pub fallback_max_chars: usize,
    /// Diversified attempts per slot
    pub attempts: u32,
    /// Token budget for diversified prompts
    pub max_tokens: u32,
    /// Token budget for the generic fallback prompt
    pub fallback_max_tokens: u32,
}

impl Default for EngineOptions {
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

/// Prompt used when diversification is exhausted.
pub fn generic_prompt(topic: &str) -> String {
    format!(
        "You are a creative social media copywriter. Write a short engaging post for: '{topic}'. \
         Keep it under 220 characters, add 2-3 relevant hashtags, and a positive CTA."
    )
}

/// Prompt for slot `slot`, attempt `attempt`.
pub fn diversified_prompt(topic: &str, slot: usize, attempt: usize) -> String {
    let cue = STYLE_CUES[slot % STYLE_CUES.len()];
    let alt = ALT_INSTRUCTIONS[attempt % ALT_INSTRUCTIONS.len()];
    format!(
        "You are a creative social media copywriter. \
         Write a short, unique post about: '{topic}'. \
         Use {cue}; {alt}. Keep it under 220 characters, include 2-3 relevant hashtags, \
         and a positive CTA."
    )
}

/// Produces de-duplicated post variants for a topic.
#[derive(Debug, Clone, Default)]
pub struct VariantEngine {
    options: EngineOptions,
}

impl VariantEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Generate `variant_count` post variants for `topic`.
    ///
    /// Always returns exactly `max(1, variant_count)` variants; backend
    /// misbehavior is absorbed, never reported as an error. The topic is
    /// trimmed and assumed non-empty.
    pub async fn generate(
        &self,
        topic: &str,
        variant_count: usize,
        text: &dyn TextGenerator,
        images: &dyn ImageSource,
        open_links: bool,
    ) -> GenerationResult {
        let topic = topic.trim();
        let count = variant_count.max(1);

        let pool = images.search(topic, count, open_links).await;
        tracing::info!(
            "Generating {count} variant(s) for {topic:?} with {} ({}), {} image(s) from {}",
            text.name(),
            text.model(),
            pool.len(),
            images.name()
        );

        let mut seen: HashSet<String> = HashSet::with_capacity(count);
        let mut variants = Vec::with_capacity(count);

        for slot in 0..count {
            let caption = match self.diversify(topic, slot, text, &mut seen).await {
                Some(caption) => caption,
                None => {
                    let caption = self.fallback(topic, slot, text).await;
                    self.guard(caption, slot, &mut seen)
                }
            };
            let (image_query, image_url) = assign_image(&pool, slot, topic);

            variants.push(PostVariant {
                text: caption,
                image_query,
                image_url,
            });
        }

        GenerationResult {
            topic: topic.to_string(),
            variants,
        }
    }

    /// Rotate prompts until a fresh, non-empty caption appears.
    ///
    /// Records the accepted fingerprint.
    async fn diversify(
        &self,
        topic: &str,
        slot: usize,
        text: &dyn TextGenerator,
        seen: &mut HashSet<String>,
    ) -> Option<String> {
        for attempt in 0..self.options.attempts as usize {
            let prompt = diversified_prompt(topic, slot, attempt);
            let raw = text.generate_text(&prompt, self.options.max_tokens).await;
            let candidate = sanitize(&raw, self.options.max_chars as i64);
            let key = fingerprint(&candidate);
            if !key.is_empty() && seen.insert(key) {
                return Some(candidate);
            }
            tracing::debug!("Slot {slot} attempt {attempt}: empty or repeated caption");
        }
        None
    }

    /// Generic caption tagged with the slot number. Not yet recorded.
    async fn fallback(&self, topic: &str, slot: usize, text: &dyn TextGenerator) -> String {
        tracing::debug!("Slot {slot}: diversification exhausted, using generic prompt");
        let raw = text
            .generate_text(&generic_prompt(topic), self.options.fallback_max_tokens)
            .await;
        let base = sanitize(&raw, self.options.fallback_max_chars as i64);
        self.with_suffix(&base, &format!(" #{}", slot + 1))
    }

    /// Disambiguate `caption` against `seen` and record the final fingerprint.
    fn guard(&self, caption: String, slot: usize, seen: &mut HashSet<String>) -> String {
        let key = fingerprint(&caption);
        if !seen.contains(&key) {
            seen.insert(key);
            return caption;
        }

        let n = slot + 1;
        let mut last = caption.clone();
        for k in 1..=GUARD_SUFFIXES {
            let suffix = if k == 1 {
                format!(" · v{n}")
            } else {
                format!(" · v{n}.{k}")
            };
            let candidate = self.with_suffix(&caption, &suffix);
            let key = fingerprint(&candidate);
            if seen.insert(key) {
                return candidate;
            }
            last = candidate;
        }

        tracing::warn!("Slot {slot}: every disambiguating suffix collided; duplicate risk accepted");
        seen.insert(fingerprint(&last));
        last
    }

    /// Append `suffix`, shortening `base` so the result fits `max_chars`.
    ///
    /// A suffix longer than the ceiling is itself cut.
    fn with_suffix(&self, base: &str, suffix: &str) -> String {
        let max_chars = self.options.max_chars;
        let room = max_chars.saturating_sub(suffix.chars().count());
        let base = truncate(base, room as i64);
        let joined = if base.is_empty() {
            suffix.trim_start().to_string()
        } else {
            format!("{base}{suffix}")
        };
        truncate(&joined, max_chars as i64)
    }
}

/// Pool entry for `slot` (cyclic), or the bare topic when the pool is empty.
fn assign_image(pool: &[ImageResult], slot: usize, topic: &str) -> (String, Option<String>) {
    if pool.is_empty() {
        return (topic.to_string(), None);
    }
    let choice = &pool[slot % pool.len()];
    (choice.query.clone(), choice.url.clone())
}
