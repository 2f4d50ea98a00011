//! Google Gemini text generator using the `generateContent` API.
//!
//! Without an API key (explicit, `GOOGLE_API_KEY`, or `GEMINI_API_KEY`) it
//! behaves like the offline stub so the default provider works out of the box.

use super::provider::{TextGenerator, TransportOptions};
use super::retry::with_retry;
use super::stub::STUB_CAPTION;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini generator.
pub struct GeminiGenerator {
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
    base_url: String,
    transport: TransportOptions,
}

impl GeminiGenerator {
    pub fn new(api_key: Option<&str>, model: &str, transport: TransportOptions) -> Self {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .or_else(|| env_key("GOOGLE_API_KEY"))
            .or_else(|| env_key("GEMINI_API_KEY"));
        Self {
            api_key,
            model: model.to_string(),
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
            transport,
        }
    }

    /// Point the generator at a different API root (the part before `/models`).
    pub fn with_endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(prompt: &str, max_tokens: u32) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: max_tokens,
            },
        }
    }

    async fn request(
        &self,
        api_key: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, ProviderError> {
        let timeout_ms = self.transport.timeout.as_millis() as u64;
        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&Self::build_request(prompt, max_tokens))
            .timeout(self.transport.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, timeout_ms))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                message: format!("HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let body: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        extract_text(body)
    }
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// --- Request types ---

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

// --- Response types ---

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// First non-blank text part across all candidates.
fn extract_text(resp: GenerateResponse) -> Result<String, ProviderError> {
    resp.candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
        .ok_or(ProviderError::Empty)
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_text(&self, prompt: &str, max_tokens: u32) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("No Gemini API key; returning stub caption");
            return STUB_CAPTION.to_string();
        };

        match with_retry(self.name(), self.transport.retry, move || {
            self.request(api_key, prompt, max_tokens)
        })
        .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Gemini generation failed: {e}");
                format!("Gemini generation failed: {e}")
            }
        }
    }
}
