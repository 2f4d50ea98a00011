//! OpenAI text generator using the Chat Completions API.

use super::provider::{TextGenerator, TransportOptions};
use super::retry::with_retry;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI generator using Chat Completions API.
pub struct OpenAiGenerator {
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
    endpoint: String,
    transport: TransportOptions,
}

impl OpenAiGenerator {
    pub fn new(api_key: Option<&str>, model: &str, transport: TransportOptions) -> Self {
        Self {
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
            model: model.to_string(),
            client: reqwest::Client::new(),
            endpoint: ENDPOINT.to_string(),
            transport,
        }
    }

    /// Point the generator at a different Chat Completions endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_request(&self, prompt: &str, max_tokens: u32) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            max_tokens,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
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
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
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

        let chat_resp: ChatResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        extract_text(chat_resp)
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn extract_text(resp: ChatResponse) -> Result<String, ProviderError> {
    resp.choices
        .into_iter()
        .find_map(|c| c.message.content)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ProviderError::Empty)
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_text(&self, prompt: &str, max_tokens: u32) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("OpenAI selected without an API key");
            return "OPENAI_API_KEY is missing.".to_string();
        };

        match with_retry(self.name(), self.transport.retry, move || {
            self.request(api_key, prompt, max_tokens)
        })
        .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("OpenAI generation failed: {e}");
                format!("OpenAI generation failed: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::RetryPolicy;
    use std::time::Duration;

    fn no_retry() -> TransportOptions {
        TransportOptions {
            timeout: Duration::from_secs(2),
            retry: RetryPolicy {
                attempts: 0,
                base_delay_ms: 0,
            },
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_degrades_to_message() {
        let gen = OpenAiGenerator::new(Some("sk-test"), "gpt-4o-mini", no_retry())
            .with_endpoint("http://127.0.0.1:1/v1/chat/completions");
        let text = gen.generate_text("Write a post", 140).await;
        assert!(text.starts_with("OpenAI generation failed:"), "{text}");
    }

    #[tokio::test]
    async fn test_missing_key_degrades_to_message() {
        let gen = OpenAiGenerator::new(None, "gpt-4o-mini", TransportOptions::default());
        assert_eq!(
            gen.generate_text("Write a post", 140).await,
            "OPENAI_API_KEY is missing."
        );

        let blank = OpenAiGenerator::new(Some("  "), "gpt-4o-mini", TransportOptions::default());
        assert_eq!(
            blank.generate_text("Write a post", 140).await,
            "OPENAI_API_KEY is missing."
        );
    }

    #[test]
    fn test_request_body_shape() {
        let gen = OpenAiGenerator::new(Some("sk-test"), "gpt-4o-mini", TransportOptions::default());
        let body = serde_json::to_value(gen.build_request("Write a post", 140)).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 140);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Write a post");
    }

    #[test]
    fn test_extract_text_trims_first_choice() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"  Sip and save! #Coffee  "}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(resp).unwrap(), "Sip and save! #Coffee");
    }

    #[test]
    fn test_extract_text_empty_choices() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_text(resp), Err(ProviderError::Empty)));
    }
}
