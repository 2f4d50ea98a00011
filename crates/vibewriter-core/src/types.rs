//! Core data types produced by the variant engine.

use serde::{Deserialize, Serialize};

/// One candidate image reference returned by an image source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Search phrase or suggestion the image stands for
    pub query: String,

    /// Resolvable image URL; `None` in link-free mode
    pub url: Option<String>,
}

impl ImageResult {
    pub fn new(query: impl Into<String>, url: Option<String>) -> Self {
        Self {
            query: query.into(),
            url,
        }
    }
}

/// One generated post: a caption paired with an image choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostVariant {
    /// Sanitized caption, never empty
    pub text: String,

    /// Query of the assigned image (or the topic when no image was found)
    pub image_query: String,

    /// URL of the assigned image; serialized as `null` when absent
    pub image_url: Option<String>,
}

/// The complete output of one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Trimmed topic the posts were generated for
    pub topic: String,

    /// Variants in slot order
    pub variants: Vec<PostVariant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_serializes_as_null() {
        let variant = PostVariant {
            text: "Fresh roast, fresh deals #Coffee".to_string(),
            image_query: "coffee".to_string(),
            image_url: None,
        };
        let json = serde_json::to_string(&variant).unwrap();
        assert!(json.contains("\"image_url\":null"));
    }

    #[test]
    fn test_result_shape() {
        let result = GenerationResult {
            topic: "spring sale".to_string(),
            variants: vec![PostVariant {
                text: "Spring into savings! #Sale".to_string(),
                image_query: "discount banner".to_string(),
                image_url: Some("https://picsum.photos/seed/discount+banner/800/600".to_string()),
            }],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["topic"], "spring sale");
        assert_eq!(value["variants"][0]["image_query"], "discount banner");
        assert_eq!(value["variants"].as_array().map(Vec::len), Some(1));
    }
}
