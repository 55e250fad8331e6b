//! Provider traits and configuration.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Result, ScrapeRequest, ScrapeResponse, SearchRequest, SearchResponse};

/// Default per-call timeout for provider adapters.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Logical operation served by a provider list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Search,
    Scrape,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Search => f.write_str("search"),
            Operation::Scrape => f.write_str("scrape"),
        }
    }
}

/// Backend services, in fallback priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Serper,
    Tavily,
    Brave,
    Jina,
}

impl ProviderKind {
    /// Short tag used in logs and in the `engine` field of results.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Serper => "serper",
            ProviderKind::Tavily => "tavily",
            ProviderKind::Brave => "brave",
            ProviderKind::Jina => "jina",
        }
    }

    /// Environment variable holding the provider credential.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderKind::Serper => "SERPER_API_KEY",
            ProviderKind::Tavily => "TAVILY_API_KEY",
            ProviderKind::Brave => "BRAVE_API_KEY",
            ProviderKind::Jina => "JINA_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration shared by every adapter.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Credential sent to the provider.
    pub api_key: String,
    /// Endpoint base URL; overridable for self-hosted gateways and tests.
    pub base_url: String,
    /// Per-call wall-clock budget.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Creates a configuration with the default timeout.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Common surface of all adapters.
pub trait Provider: Send + Sync {
    /// Returns the backend this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// Returns the adapter configuration.
    fn config(&self) -> &ProviderConfig;

    /// Returns the provider tag.
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// Adapter capable of web search.
///
/// Implementations issue exactly one HTTP call per invocation and never retry;
/// fallback decisions belong to [`crate::Fallback`].
#[async_trait]
pub trait SearchProvider: Provider {
    /// Performs a search and returns the canonical result.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;
}

/// Adapter capable of scraping a webpage.
#[async_trait]
pub trait ScrapeProvider: Provider {
    /// Scrapes a page and returns the canonical result.
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse>;
}
