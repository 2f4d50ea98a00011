//! Offline text generator.
//!
//! Returns the same caption for every prompt. Useful without credentials and
//! in tests; the variant engine's uniqueness guard keeps its output distinct.

use super::provider::TextGenerator;
use async_trait::async_trait;

/// Caption returned by offline and credential-less backends.
pub const STUB_CAPTION: &str = "Celebrate savings with our limited-time offer! #Deal #Promo";

/// Text generator that never touches the network.
#[derive(Debug, Clone)]
pub struct StubGenerator {
    caption: String,
}

impl StubGenerator {
    pub fn new(caption: &str) -> Self {
        Self {
            caption: caption.to_string(),
        }
    }
}

impl Default for StubGenerator {
    fn default() -> Self {
        Self::new(STUB_CAPTION)
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub"
    }

    async fn generate_text(&self, _prompt: &str, _max_tokens: u32) -> String {
        self.caption.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_ignores_prompt() {
        let stub = StubGenerator::default();
        let a = stub.generate_text("first prompt", 140).await;
        let b = stub.generate_text("second prompt", 10).await;
        assert_eq!(a, STUB_CAPTION);
        assert_eq!(a, b);
    }
}
