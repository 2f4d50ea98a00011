//! Anthropic text generator using the Messages API.

use super::provider::{TextGenerator, TransportOptions};
use super::retry::with_retry;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Returned when no key is configured; the sanitizer strips the marker.
const MISSING_KEY_MESSAGE: &str = "[Anthropic STUB] API key missing; returning placeholder.";

/// Anthropic generator using the Messages API.
pub struct AnthropicGenerator {
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
    transport: TransportOptions,
}

impl AnthropicGenerator {
    pub fn new(api_key: Option<&str>, model: &str, transport: TransportOptions) -> Self {
        Self {
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
            model: model.to_string(),
            client: reqwest::Client::new(),
            transport,
        }
    }

    fn build_request(&self, prompt: &str, max_tokens: u32) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![ContentBlock::Text {
                    text: prompt.to_string(),
                }],
            }],
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
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&self.build_request(prompt, max_tokens))
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

        let messages_resp: MessagesResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        extract_text(messages_resp)
    }
}

// --- Request types ---

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

// --- Response types ---

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    text: Option<String>,
}

fn extract_text(resp: MessagesResponse) -> Result<String, ProviderError> {
    let text = resp
        .content
        .into_iter()
        .filter_map(|c| c.text)
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim();
    if text.is_empty() {
        return Err(ProviderError::Empty);
    }
    Ok(text.to_string())
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_text(&self, prompt: &str, max_tokens: u32) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("Anthropic selected without an API key");
            return MISSING_KEY_MESSAGE.to_string();
        };

        match with_retry(self.name(), self.transport.retry, move || {
            self.request(api_key, prompt, max_tokens)
        })
        .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Anthropic generation failed: {e}");
                format!("Anthropic generation failed: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_returns_stub_message() {
        let gen = AnthropicGenerator::new(None, "claude-3-haiku-20240307", TransportOptions::default());
        let text = gen.generate_text("Write a post", 140).await;
        assert!(text.starts_with("[Anthropic STUB]"));
    }

    #[test]
    fn test_request_body_shape() {
        let gen = AnthropicGenerator::new(Some("key"), "claude-3-haiku-20240307", TransportOptions::default());
        let body = serde_json::to_value(gen.build_request("Write a post", 140)).unwrap();
        assert_eq!(body["max_tokens"], 140);
        assert_eq!(body["messages"][0]["content"][0]["type"], "text");
        assert_eq!(body["messages"][0]["content"][0]["text"], "Write a post");
    }

    #[test]
    fn test_extract_text_joins_blocks() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"Fall in love "},{"type":"text","text":"with autumn blends. #PSL"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(resp).unwrap(), "Fall in love with autumn blends. #PSL");
    }

    #[test]
    fn test_extract_text_empty() {
        let resp: MessagesResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert!(matches!(extract_text(resp), Err(ProviderError::Empty)));
    }
}
