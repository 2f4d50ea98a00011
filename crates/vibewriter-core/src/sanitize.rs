//! Best-effort cleanup applied to every generated caption.
//!
//! Strips backend debug markers, redacts email- and phone-like strings,
//! masks a tiny profanity denylist, and enforces a character ceiling.
//! This is not content moderation.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Replacement for email-like substrings.
pub const EMAIL_PLACEHOLDER: &str = "[email]";

/// Replacement for phone-number-like digit runs.
pub const PHONE_PLACEHOLDER: &str = "[phone]";

/// Appended when text is cut to fit the ceiling.
pub const ELLIPSIS: char = '…';

const PROFANITY_WORDS: [&str; 3] = ["damn", "shit", "fuck"];

static STUB_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\[[^\]]+\])\s*").expect("Invalid stub prefix regex"));

static EXAMPLE_CAPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*->\s*Example caption:\s*").expect("Invalid artifact regex")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("Invalid email regex")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\+?[0-9][0-9\-\s]{6,}[0-9]\b").expect("Invalid phone regex"));

static PROFANITY: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PROFANITY_WORDS
        .iter()
        .map(|w| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(w)))
                .expect("Invalid profanity regex")
        })
        .collect()
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Run the full cleanup chain and cap the result at `max_chars` characters.
///
/// A non-positive `max_chars` yields an empty string.
pub fn sanitize(raw: &str, max_chars: i64) -> String {
    let text = strip_stub_prefix(raw.trim()).trim();
    let text = EXAMPLE_CAPTION.replace_all(text, "");
    let text = scrub_pii(&text);
    let text = mask_profanity(&text);
    truncate(&text, max_chars)
}

/// Remove a leading `[...]` marker such as `[Gemini STUB]`.
///
/// The redaction placeholders are left in place so cleanup stays idempotent.
pub fn strip_stub_prefix(text: &str) -> &str {
    match STUB_PREFIX.captures(text) {
        Some(caps) if !is_placeholder(&caps[1]) => &text[caps[0].len()..],
        _ => text,
    }
}

fn is_placeholder(marker: &str) -> bool {
    marker == EMAIL_PLACEHOLDER || marker == PHONE_PLACEHOLDER
}

/// Redact email-like and phone-like substrings.
pub fn scrub_pii(text: &str) -> String {
    let text = EMAIL.replace_all(text, EMAIL_PLACEHOLDER);
    PHONE.replace_all(&text, PHONE_PLACEHOLDER).into_owned()
}

/// Mask denylisted words, keeping the first and last character of longer words.
pub fn mask_profanity(text: &str) -> String {
    let mut out = text.to_string();
    for pattern in PROFANITY.iter() {
        out = pattern
            .replace_all(&out, |caps: &Captures| mask_word(&caps[0]))
            .into_owned();
    }
    out
}

fn mask_word(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 2 {
        return "*".repeat(chars.len());
    }
    let mut masked = String::with_capacity(word.len());
    masked.push(chars[0]);
    masked.push_str(&"*".repeat(chars.len() - 2));
    masked.push(chars[chars.len() - 1]);
    masked
}

/// Cap `text` at `max_chars` characters, ending in an ellipsis when cut.
pub fn truncate(text: &str, max_chars: i64) -> String {
    if max_chars <= 0 {
        return String::new();
    }
    let max_chars = max_chars as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars - 1).collect();
    let mut out = head.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

/// Normalized form of a caption used for duplicate detection.
///
/// Ignores a leading stub marker, case, and whitespace layout.
pub fn fingerprint(text: &str) -> String {
    let lowered = strip_stub_prefix(text).to_lowercase();
    WHITESPACE.replace_all(&lowered, " ").trim().to_string()
}
