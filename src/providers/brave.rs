//! Brave Search API adapter.

use async_trait::async_trait;
use serde::Deserialize;

use crate::http;
use crate::provider::{Provider, ProviderConfig, ProviderKind, SearchProvider};
use crate::result::null_as_default;
use crate::{OperationKind, OrganicResult, Result, SearchRequest, SearchResponse};

/// API base URL.
pub const BASE_URL: &str = "https://api.search.brave.com";

const WEB_SEARCH_PATH: &str = "res/v1/web/search";

/// Brave web search adapter.
pub struct Brave {
    config: ProviderConfig,
}

impl Brave {
    /// Creates an adapter for the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ProviderConfig::new(api_key, BASE_URL))
    }

    /// Creates an adapter with custom configuration.
    pub fn from_config(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Query parameters; `gl` maps to `country` and `hl` to `search_lang`.
    fn params(request: &SearchRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", request.q.clone())];
        if let Some(num) = request.num {
            params.push(("count", num.to_string()));
        }
        if let Some(gl) = request.gl.as_deref().filter(|s| !s.is_empty()) {
            params.push(("country", gl.to_string()));
        }
        if let Some(hl) = request.hl.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search_lang", hl.to_string()));
        }
        params
    }
}

impl Provider for Brave {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Brave
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl SearchProvider for Brave {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let client = http::client(&self.config)?;
        let builder = client
            .get(self.config.endpoint(WEB_SEARCH_PATH))
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.config.api_key)
            .query(&Self::params(request));

        let response: BraveResponse = http::send_json(self.name(), builder).await?;
        Ok(transform(response, &request.q))
    }
}

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
struct BraveWeb {
    #[serde(default, deserialize_with = "null_as_default")]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
}

fn transform(response: BraveResponse, query: &str) -> SearchResponse {
    let entries = response
        .web
        .map(|web| web.results)
        .unwrap_or_default()
        .into_iter()
        .map(|r| OrganicResult::new(r.title, r.url, r.description));

    SearchResponse::from_entries(query, OperationKind::Search, ProviderKind::Brave.as_str(), entries)
}
