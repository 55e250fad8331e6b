//! Serper (Google) search and scrape. Native provider: responses already
//! have the canonical shape.

use async_trait::async_trait;

use crate::http;
use crate::provider::{Provider, ProviderConfig, ProviderKind, ScrapeProvider, SearchProvider};
use crate::{Result, ScrapeRequest, ScrapeResponse, SearchRequest, SearchResponse};

/// Search endpoint base; the operation kind is appended as a path segment.
pub const SEARCH_BASE_URL: &str = "https://google.serper.dev";

/// Scrape endpoint.
pub const SCRAPE_BASE_URL: &str = "https://scrape.serper.dev";

/// Serper search adapter.
pub struct SerperSearch {
    config: ProviderConfig,
}

impl SerperSearch {
    /// Creates an adapter for the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ProviderConfig::new(api_key, SEARCH_BASE_URL))
    }

    /// Creates an adapter with custom configuration.
    pub fn from_config(config: ProviderConfig) -> Self {
        Self { config }
    }
}

impl Provider for SerperSearch {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Serper
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl SearchProvider for SerperSearch {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = self.config.endpoint(request.kind.as_str());
        let client = http::client(&self.config)?;
        let builder = client
            .post(&url)
            .header("X-API-KEY", &self.config.api_key)
            .json(request);

        http::send_json(self.name(), builder).await
    }
}

/// Serper webpage scrape adapter.
pub struct SerperScrape {
    config: ProviderConfig,
}

impl SerperScrape {
    /// Creates an adapter for the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ProviderConfig::new(api_key, SCRAPE_BASE_URL))
    }

    /// Creates an adapter with custom configuration.
    pub fn from_config(config: ProviderConfig) -> Self {
        Self { config }
    }
}

impl Provider for SerperScrape {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Serper
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl ScrapeProvider for SerperScrape {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse> {
        let request = request.normalized();
        let client = http::client(&self.config)?;
        let builder = client
            .post(&self.config.base_url)
            .header("X-API-KEY", &self.config.api_key)
            .json(&request);

        let response = http::send_json(self.name(), builder).await?;
        Ok(fill_scrape_response(response, &request))
    }
}

/// Serper scrape answers with `text` and `metadata`; fills `url` and
/// `title` from the request and metadata when absent.
fn fill_scrape_response(mut response: ScrapeResponse, request: &ScrapeRequest) -> ScrapeResponse {
    if response.url.is_empty() {
        response.url = request.url.clone();
    }
    if response.title.is_empty() {
        if let Some(title) = response
            .extra
            .get("metadata")
            .and_then(|m| m.get("title"))
            .and_then(|t| t.as_str())
        {
            response.title = title.to_string();
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serper_search_new() {
        let adapter = SerperSearch::new("key");
        assert_eq!(adapter.name(), "serper");
        assert_eq!(adapter.config().base_url, SEARCH_BASE_URL);
    }

    #[test]
    fn test_serper_scrape_new() {
        let adapter = SerperScrape::new("key");
        assert_eq!(adapter.kind(), ProviderKind::Serper);
        assert_eq!(adapter.config().base_url, SCRAPE_BASE_URL);
    }

    #[test]
    fn test_fill_scrape_response_from_metadata() {
        let native: ScrapeResponse = serde_json::from_value(json!({
            "text": "Example Domain",
            "metadata": {"title": "Example", "description": "An example"},
            "credits": 1
        }))
        .unwrap();

        let response = fill_scrape_response(native, &ScrapeRequest::new("https://example.com"));
        assert_eq!(response.url, "https://example.com");
        assert_eq!(response.title, "Example");
        assert_eq!(response.text, "Example Domain");
        assert!(response.success);
        assert!(response.engine.is_none());
    }

    #[test]
    fn test_fill_scrape_response_keeps_provider_values() {
        let native: ScrapeResponse = serde_json::from_value(json!({
            "url": "https://example.com/final",
            "title": "Given",
            "text": "",
            "metadata": {"title": "Other"}
        }))
        .unwrap();

        let response = fill_scrape_response(native, &ScrapeRequest::new("https://example.com"));
        assert_eq!(response.url, "https://example.com/final");
        assert_eq!(response.title, "Given");
    }

    #[test]
    fn test_fill_scrape_response_without_metadata() {
        let native: ScrapeResponse = serde_json::from_value(json!({"text": "hi"})).unwrap();
        let response = fill_scrape_response(native, &ScrapeRequest::new("https://a.example"));
        assert_eq!(response.title, "");
    }
}
