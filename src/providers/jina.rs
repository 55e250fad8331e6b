//! Jina search (`s.jina.ai`) and reader (`r.jina.ai`) adapters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::http;
use crate::provider::{Provider, ProviderConfig, ProviderKind, ScrapeProvider, SearchProvider};
use crate::result::null_as_default;
use crate::{
    OperationKind, OrganicResult, Result, ScrapeRequest, ScrapeResponse, SearchRequest,
    SearchResponse,
};

/// Search endpoint.
pub const SEARCH_BASE_URL: &str = "https://s.jina.ai";

/// Reader endpoint; the target URL is appended to the path.
pub const SCRAPE_BASE_URL: &str = "https://r.jina.ai";

/// Jina caps results per search call.
pub const MAX_RESULTS: u32 = 10;

/// Jina search adapter.
pub struct JinaSearch {
    config: ProviderConfig,
}

impl JinaSearch {
    /// Creates an adapter for the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ProviderConfig::new(api_key, SEARCH_BASE_URL))
    }

    /// Creates an adapter with custom configuration.
    pub fn from_config(config: ProviderConfig) -> Self {
        Self { config }
    }

    fn payload(request: &SearchRequest) -> JinaSearchRequest<'_> {
        JinaSearchRequest {
            q: &request.q,
            options: "Markdown",
            gl: request.gl.as_deref().filter(|s| !s.is_empty()),
            hl: request.hl.as_deref().filter(|s| !s.is_empty()),
            num: request.num.filter(|n| *n > 0).map(|n| n.min(MAX_RESULTS)),
        }
    }
}

impl Provider for JinaSearch {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Jina
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl SearchProvider for JinaSearch {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let client = http::client(&self.config)?;
        let builder = client
            .post(self.config.endpoint(""))
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
            .json(&Self::payload(request));

        let response: JinaSearchResponse = http::send_json(self.name(), builder).await?;
        Ok(transform_search(response, &request.q))
    }
}

/// Jina reader adapter.
pub struct JinaScrape {
    config: ProviderConfig,
}

impl JinaScrape {
    /// Creates an adapter for the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ProviderConfig::new(api_key, SCRAPE_BASE_URL))
    }

    /// Creates an adapter with custom configuration.
    pub fn from_config(config: ProviderConfig) -> Self {
        Self { config }
    }
}

impl Provider for JinaScrape {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Jina
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl ScrapeProvider for JinaScrape {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse> {
        let request = request.normalized();
        let client = http::client(&self.config)?;
        let builder = client
            .get(self.config.endpoint(&request.url))
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
            .header("x-respond-with", "json")
            .header("x-no-cache", "true");

        let response: JinaScrapeResponse = http::send_json(self.name(), builder).await?;
        Ok(transform_scrape(response, &request.url))
    }
}

#[derive(Serialize)]
struct JinaSearchRequest<'a> {
    q: &'a str,
    options: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    gl: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hl: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct JinaSearchResponse {
    #[serde(default)]
    data: Option<Vec<JinaSearchResult>>,
}

#[derive(Debug, Deserialize)]
struct JinaSearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct JinaPage {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    content: String,
}

/// The reader wraps the page in `data`; older deployments return it flat.
#[derive(Debug, Deserialize)]
struct JinaScrapeResponse {
    #[serde(default)]
    data: Option<JinaPage>,
    #[serde(flatten)]
    page: JinaPage,
}

fn transform_search(response: JinaSearchResponse, query: &str) -> SearchResponse {
    let entries = response
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|r| OrganicResult::new(r.title, r.url, r.description));

    SearchResponse::from_entries(query, OperationKind::Search, ProviderKind::Jina.as_str(), entries)
}

fn transform_scrape(response: JinaScrapeResponse, url: &str) -> ScrapeResponse {
    let page = response.data.unwrap_or(response.page);
    ScrapeResponse {
        url: url.to_string(),
        title: page.title,
        text: page.content,
        success: true,
        engine: Some(ProviderKind::Jina.as_str().to_string()),
        extra: Default::default(),
    }
}
