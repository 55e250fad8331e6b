//! MCP tool surface: tool names, argument decoding and dispatch.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::{Fallback, OperationKind, Result, ScrapeRequest, SearchError, SearchRequest};

/// Tool exposed to agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// A search tool for the given vertical.
    Search(OperationKind),
    /// The webpage scrape tool.
    Scrape,
}

const SCRAPE_TOOL: &str = "webpage_scrape";

impl Tool {
    /// All tools in declaration order.
    pub fn all() -> Vec<Tool> {
        OperationKind::ALL
            .into_iter()
            .map(Tool::Search)
            .chain(std::iter::once(Tool::Scrape))
            .collect()
    }

    /// Tool name as declared to agents.
    pub fn name(&self) -> String {
        match self {
            Tool::Search(OperationKind::Search) => "google_search".to_string(),
            Tool::Search(kind) => format!("google_search_{}", kind),
            Tool::Scrape => SCRAPE_TOOL.to_string(),
        }
    }

    /// One-line description for tool listings.
    pub fn description(&self) -> String {
        match self {
            Tool::Search(OperationKind::Search) => "Search the web".to_string(),
            Tool::Search(OperationKind::Autocomplete) => "Get search query suggestions".to_string(),
            Tool::Search(kind) => format!("Search {}", kind),
            Tool::Scrape => "Fetch a webpage and extract its text".to_string(),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Tool {
    type Err = SearchError;

    /// Search tools are `google_search` or `google_search_<kind>`.
    fn from_str(name: &str) -> Result<Self> {
        if name == SCRAPE_TOOL {
            return Ok(Tool::Scrape);
        }
        if name == "google_search" {
            return Ok(Tool::Search(OperationKind::Search));
        }

        name.strip_prefix("google_search_")
            .filter(|suffix| !suffix.contains('_'))
            .and_then(|suffix| suffix.parse::<OperationKind>().ok())
            .map(Tool::Search)
            .ok_or_else(|| SearchError::InvalidRequest(format!("Unknown tool '{}'", name)))
    }
}

/// Routes tool invocations to the fallback orchestrator.
#[derive(Clone)]
pub struct Dispatcher {
    fallback: Fallback,
}

impl Dispatcher {
    /// Creates a dispatcher.
    pub fn new(fallback: Fallback) -> Self {
        Self { fallback }
    }

    /// Invokes `tool` with JSON `arguments` and returns the JSON result.
    pub async fn call(&self, tool: Tool, arguments: Value) -> Result<Value> {
        debug!("Calling tool {}", tool);
        match tool {
            Tool::Search(kind) => {
                let request: SearchRequest = parse_arguments(arguments)?;
                let request = request.with_kind(kind);
                let response = self.fallback.search(&request).await?;
                Ok(serde_json::to_value(response)?)
            }
            Tool::Scrape => {
                let request: ScrapeRequest = parse_arguments(arguments)?;
                let response = self.fallback.scrape(&request).await?;
                Ok(serde_json::to_value(response)?)
            }
        }
    }

    /// Invokes a tool by name.
    pub async fn call_by_name(&self, name: &str, arguments: Value) -> Result<Value> {
        let tool = name.parse::<Tool>()?;
        self.call(tool, arguments).await
    }
}

fn parse_arguments<T: serde::de::DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments)
        .map_err(|e| SearchError::InvalidRequest(format!("Invalid arguments: {}", e)))
}
