//! Canonical search and scrape results.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::OperationKind;

/// A single organic search entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganicResult {
    /// Result title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Result URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    /// Result description/snippet.
    #[serde(default, deserialize_with = "null_as_default")]
    pub snippet: String,
    /// 1-based position in the result list.
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: u32,
    /// Provider-specific fields (sitelinks, date, rating, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrganicResult {
    /// Creates an entry with position 0; positions are assigned by
    /// [`SearchResponse::from_entries`].
    pub fn new(title: impl Into<String>, link: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
            position: 0,
            extra: Map::new(),
        }
    }
}

/// Search parameters echoed back with a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParameters {
    /// The query as understood by the provider.
    #[serde(default, deserialize_with = "null_as_default")]
    pub q: String,
    /// Search vertical.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Engine tag. Fallback providers set their own tag; native results
    /// carry whatever Serper echoes (usually `google`) or nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Remaining echoed parameters (gl, hl, num, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A search result in the canonical shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Search parameters.
    #[serde(default, deserialize_with = "null_as_default")]
    pub search_parameters: SearchParameters,
    /// Organic results in rank order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub organic: Vec<OrganicResult>,
    /// Additional native sections (knowledgeGraph, images, news, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResponse {
    /// Builds a response from mapped entries, numbering them `1..=len`.
    pub fn from_entries(
        query: impl Into<String>,
        kind: OperationKind,
        engine: &str,
        entries: impl IntoIterator<Item = OrganicResult>,
    ) -> Self {
        let organic = entries
            .into_iter()
            .enumerate()
            .map(|(i, mut entry)| {
                entry.position = i as u32 + 1;
                entry
            })
            .collect();

        Self {
            search_parameters: SearchParameters {
                q: query.into(),
                kind: kind.as_str().to_string(),
                engine: Some(engine.to_string()),
                extra: Map::new(),
            },
            organic,
            extra: Map::new(),
        }
    }

    /// Returns the engine tag from the search parameters.
    pub fn engine(&self) -> Option<&str> {
        self.search_parameters.engine.as_deref()
    }

    /// Returns whether positions are exactly `1..=len` in order.
    pub fn has_contiguous_positions(&self) -> bool {
        self.organic
            .iter()
            .enumerate()
            .all(|(i, entry)| entry.position as usize == i + 1)
    }
}

/// A scraped page in the canonical shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResponse {
    /// Scraped URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Page title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Extracted text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Whether extraction succeeded.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Provider that produced the result when it is not the native one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Additional native fields (markdown, metadata, credits, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_success() -> bool {
    true
}

/// Reads an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
