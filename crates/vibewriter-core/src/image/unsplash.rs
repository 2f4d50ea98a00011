//! Link-resolving image source backed by the Unsplash search API.
//!
//! Falls back to [`SuggestionSource`] on a missing key, any request or parse
//! failure, or an empty result set.

use super::source::ImageSource;
use super::suggestion::SuggestionSource;
use crate::error::ProviderError;
use crate::types::ImageResult;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// Unsplash allows large pages, but a handful of candidates is plenty.
const MAX_PER_PAGE: usize = 5;

/// Unsplash-backed image source.
pub struct UnsplashSource {
    access_key: Option<String>,
    client: reqwest::Client,
    search_url: String,
    timeout: Duration,
}

impl UnsplashSource {
    pub fn new(access_key: Option<&str>, timeout: Duration) -> Self {
        Self {
            access_key: access_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
            client: reqwest::Client::new(),
            search_url: SEARCH_URL.to_string(),
            timeout,
        }
    }

    /// Point the source at a different photo search endpoint.
    pub fn with_endpoint(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    async fn request(
        &self,
        access_key: &str,
        query: &str,
        limit: usize,
    ) -> Result<SearchResponse, ProviderError> {
        let per_page = limit.clamp(1, MAX_PER_PAGE).to_string();
        let resp = self
            .client
            .get(&self.search_url)
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("orientation", "landscape"),
            ])
            .header("Accept-Version", "v1")
            .header("Authorization", format!("Client-ID {access_key}"))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, self.timeout.as_millis() as u64))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                message: format!("HTTP {status}"),
                status_code: Some(status.as_u16()),
            });
        }

        resp.json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    #[serde(default)]
    urls: PhotoUrls,
}

#[derive(Deserialize, Default)]
struct PhotoUrls {
    regular: Option<String>,
}

fn to_results(resp: SearchResponse, query: &str, limit: usize, open_links: bool) -> Vec<ImageResult> {
    resp.results
        .into_iter()
        .take(limit)
        .map(|photo| {
            let url = if open_links { photo.urls.regular } else { None };
            ImageResult::new(query, url)
        })
        .collect()
}

#[async_trait]
impl ImageSource for UnsplashSource {
    fn name(&self) -> &str {
        "unsplash"
    }

    async fn search(&self, query: &str, limit: usize, open_links: bool) -> Vec<ImageResult> {
        let Some(access_key) = self.access_key.as_deref() else {
            tracing::debug!("No Unsplash access key; using suggestions");
            return SuggestionSource::suggest(query, limit, open_links);
        };

        match self.request(access_key, query, limit).await {
            Ok(resp) => {
                let results = to_results(resp, query, limit, open_links);
                if results.is_empty() {
                    tracing::info!("Unsplash returned no photos for {query:?}; using suggestions");
                    SuggestionSource::suggest(query, limit, open_links)
                } else {
                    results
                }
            }
            Err(e) => {
                tracing::warn!("Unsplash search failed: {e}; using suggestions");
                SuggestionSource::suggest(query, limit, open_links)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"total":2,"results":[
        {"id":"a","urls":{"regular":"https://images.unsplash.com/a"}},
        {"id":"b","urls":{"regular":"https://images.unsplash.com/b"}},
        {"id":"c","urls":{}}
    ]}"#;

    #[test]
    fn test_to_results_with_links() {
        let resp: SearchResponse = serde_json::from_str(BODY).unwrap();
        let results = to_results(resp, "latte art", 2, true);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].query, "latte art");
        assert_eq!(results[1].url.as_deref(), Some("https://images.unsplash.com/b"));
    }

    #[test]
    fn test_to_results_link_free() {
        let resp: SearchResponse = serde_json::from_str(BODY).unwrap();
        let results = to_results(resp, "latte art", 10, false);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.url.is_none()));
    }

    #[tokio::test]
    async fn test_missing_key_falls_back_to_suggestions() {
        let source = UnsplashSource::new(Some(""), Duration::from_secs(1));
        let results = source.search("pumpkin spice", 3, true).await;
        assert_eq!(results, SuggestionSource::suggest("pumpkin spice", 3, true));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back_to_suggestions() {
        let source = UnsplashSource::new(Some("access-test"), Duration::from_secs(2))
            .with_endpoint("http://127.0.0.1:1/search/photos");
        let results = source.search("pumpkin spice", 3, false).await;
        assert_eq!(results, SuggestionSource::suggest("pumpkin spice", 3, false));
    }
}
