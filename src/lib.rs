//! # a3s-search-mcp
//!
//! Web search and webpage scraping for MCP agents, served by whichever of
//! several third-party providers is configured.
//!
//! Supported providers:
//!
//! - Serper (native format; search verticals and scrape)
//! - Tavily (search)
//! - Brave Search API (search)
//! - Jina (search and reader)
//!
//! Providers are tried one at a time in a fixed priority order. Network,
//! timeout and HTTP-status failures fall through to the next provider; any
//! other failure is returned immediately.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use a3s_search_mcp::{Fallback, OperationKind, Registry, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fallback = Fallback::new(Arc::new(Registry::from_env()));
//!
//!     let request = SearchRequest::new("rust ownership").with_kind(OperationKind::News);
//!     let response = fallback.search(&request).await?;
//!
//!     for result in &response.organic {
//!         println!("{}. {}: {}", result.position, result.title, result.link);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod fallback;
mod http;
mod provider;
mod registry;
mod request;
mod result;

pub mod providers;
pub mod tools;

pub use config::{Settings, TIMEOUT_ENV, TIMEOUT_ENV_ALIAS};
pub use error::{Result, SearchError};
pub use fallback::{execute, execute_scrape, execute_search, Fallback};
pub use provider::{
    Operation, Provider, ProviderConfig, ProviderKind, ScrapeProvider, SearchProvider,
    DEFAULT_TIMEOUT,
};
pub use registry::{
    build_scrape_providers, build_search_providers, Registry, SCRAPE_PRIORITY, SEARCH_PRIORITY,
};
pub use request::{OperationKind, ScrapeRequest, SearchRequest};
pub use result::{OrganicResult, ScrapeResponse, SearchParameters, SearchResponse};
pub use tools::{Dispatcher, Tool};
