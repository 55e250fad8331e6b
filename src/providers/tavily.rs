//! Tavily search adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::http;
use crate::provider::{Provider, ProviderConfig, ProviderKind, SearchProvider};
use crate::result::null_as_default;
use crate::{OperationKind, OrganicResult, Result, SearchRequest, SearchResponse};

/// API base URL.
pub const BASE_URL: &str = "https://api.tavily.com";

/// Tavily search adapter. Only the query and result count are forwarded.
pub struct Tavily {
    config: ProviderConfig,
}

impl Tavily {
    /// Creates an adapter for the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ProviderConfig::new(api_key, BASE_URL))
    }

    /// Creates an adapter with custom configuration.
    pub fn from_config(config: ProviderConfig) -> Self {
        Self { config }
    }

    fn payload<'a>(&'a self, request: &'a SearchRequest) -> TavilyRequest<'a> {
        TavilyRequest {
            api_key: &self.config.api_key,
            query: &request.q,
            search_depth: "basic",
            include_answer: false,
            max_results: request.num,
        }
    }
}

impl Provider for Tavily {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Tavily
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl SearchProvider for Tavily {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let client = http::client(&self.config)?;
        let builder = client
            .post(self.config.endpoint("search"))
            .json(&self.payload(request));

        let response: TavilyResponse = http::send_json(self.name(), builder).await?;
        Ok(transform(response, &request.q))
    }
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'static str,
    include_answer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    query: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    content: String,
}

fn transform(response: TavilyResponse, query: &str) -> SearchResponse {
    let query = response.query.unwrap_or_else(|| query.to_string());
    let entries = response
        .results
        .into_iter()
        .map(|r| OrganicResult::new(r.title, r.url, r.content));

    SearchResponse::from_entries(query, OperationKind::Search, ProviderKind::Tavily.as_str(), entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tavily_new() {
        let adapter = Tavily::new("tvly-key");
        assert_eq!(adapter.name(), "tavily");
        assert_eq!(adapter.config().base_url, BASE_URL);
    }

    #[test]
    fn test_payload_drops_other_fields() {
        let adapter = Tavily::new("tvly-key");
        let request = SearchRequest::new("rust ownership")
            .with_country("us")
            .with_language("en")
            .with_num(5)
            .with_kind(OperationKind::News);

        let payload = serde_json::to_value(adapter.payload(&request)).unwrap();
        assert_eq!(
            payload,
            json!({
                "api_key": "tvly-key",
                "query": "rust ownership",
                "search_depth": "basic",
                "include_answer": false,
                "max_results": 5
            })
        );
    }

    #[test]
    fn test_payload_omits_unset_count() {
        let adapter = Tavily::new("k");
        let payload = serde_json::to_value(adapter.payload(&SearchRequest::new("q"))).unwrap();
        assert!(payload.get("max_results").is_none());
    }

    #[test]
    fn test_transform_assigns_positions() {
        let native: TavilyResponse = serde_json::from_value(json!({
            "query": "rust ownership",
            "results": [
                {"title": "Ownership", "url": "https://doc.rust-lang.org/book/ch04-01.html", "content": "Ownership is...", "score": 0.9},
                {"title": "Borrowing", "url": "https://doc.rust-lang.org/book/ch04-02.html", "content": "References..."},
                {"url": "https://example.com"}
            ]
        }))
        .unwrap();

        let response = transform(native, "ignored");
        assert_eq!(response.search_parameters.q, "rust ownership");
        assert_eq!(response.search_parameters.kind, "search");
        assert_eq!(response.engine(), Some("tavily"));
        assert_eq!(response.organic.len(), 3);
        assert!(response.has_contiguous_positions());
        assert_eq!(response.organic[0].link, "https://doc.rust-lang.org/book/ch04-01.html");
        assert_eq!(response.organic[0].snippet, "Ownership is...");
        assert_eq!(response.organic[2].title, "");
        assert_eq!(response.organic[2].snippet, "");
    }

    #[test]
    fn test_transform_tolerates_null_fields() {
        let native: TavilyResponse = serde_json::from_value(json!({
            "query": null,
            "results": [{"title": "Ownership", "url": null, "content": null}]
        }))
        .unwrap();

        let response = transform(native, "rust ownership");
        assert_eq!(response.search_parameters.q, "rust ownership");
        assert_eq!(response.organic[0].title, "Ownership");
        assert_eq!(response.organic[0].link, "");
        assert_eq!(response.organic[0].snippet, "");
    }

    #[test]
    fn test_transform_falls_back_to_request_query() {
        let native: TavilyResponse = serde_json::from_value(json!({"results": []})).unwrap();
        let response = transform(native, "fallback");
        assert_eq!(response.search_parameters.q, "fallback");
        assert!(response.organic.is_empty());
    }
}
