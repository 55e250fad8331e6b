//! Canonical search and scrape requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Search vertical. Selects the sub-endpoint on providers that have one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    #[default]
    Search,
    Images,
    Videos,
    Places,
    Maps,
    Reviews,
    News,
    Shopping,
    Lens,
    Scholar,
    Patents,
    Autocomplete,
}

impl OperationKind {
    /// All kinds, in tool declaration order.
    pub const ALL: [OperationKind; 12] = [
        OperationKind::Search,
        OperationKind::Images,
        OperationKind::Videos,
        OperationKind::Places,
        OperationKind::Maps,
        OperationKind::Reviews,
        OperationKind::News,
        OperationKind::Shopping,
        OperationKind::Lens,
        OperationKind::Scholar,
        OperationKind::Patents,
        OperationKind::Autocomplete,
    ];

    /// Path segment used by endpoint-per-kind providers.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Search => "search",
            OperationKind::Images => "images",
            OperationKind::Videos => "videos",
            OperationKind::Places => "places",
            OperationKind::Maps => "maps",
            OperationKind::Reviews => "reviews",
            OperationKind::News => "news",
            OperationKind::Shopping => "shopping",
            OperationKind::Lens => "lens",
            OperationKind::Scholar => "scholar",
            OperationKind::Patents => "patents",
            OperationKind::Autocomplete => "autocomplete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SearchError::InvalidRequest(format!("Unknown search kind '{}'", s)))
    }
}

/// A search request in the provider-neutral shape.
///
/// Serializes to the native (Serper) payload: unset options are omitted and
/// `kind` is never part of the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search terms.
    pub q: String,
    /// Country code (e.g., "us").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gl: Option<String>,
    /// Interface language (e.g., "en").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,
    /// Free-form location (e.g., "Berlin, Germany").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Result-count hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<u32>,
    /// Page number (1-indexed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Time-based filter (e.g., "qdr:w").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tbs: Option<String>,
    /// Whether the provider may autocorrect the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocorrect: Option<bool>,
    /// Search vertical, set by the caller.
    #[serde(skip)]
    pub kind: OperationKind,
}

impl SearchRequest {
    /// Creates a web search request for the given terms.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            gl: None,
            hl: None,
            location: None,
            num: None,
            page: None,
            tbs: None,
            autocorrect: None,
            kind: OperationKind::Search,
        }
    }

    /// Sets the search vertical.
    pub fn with_kind(mut self, kind: OperationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the country code.
    pub fn with_country(mut self, gl: impl Into<String>) -> Self {
        self.gl = Some(gl.into());
        self
    }

    /// Sets the interface language.
    pub fn with_language(mut self, hl: impl Into<String>) -> Self {
        self.hl = Some(hl.into());
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the result-count hint.
    pub fn with_num(mut self, num: u32) -> Self {
        self.num = Some(num);
        self
    }

    /// Sets the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the time filter.
    pub fn with_tbs(mut self, tbs: impl Into<String>) -> Self {
        self.tbs = Some(tbs.into());
        self
    }

    /// Sets autocorrect.
    pub fn with_autocorrect(mut self, autocorrect: bool) -> Self {
        self.autocorrect = Some(autocorrect);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.q.trim().is_empty() {
            return Err(SearchError::InvalidRequest("Query cannot be empty".into()));
        }
        Ok(())
    }
}

/// A webpage scrape request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    /// Page to scrape.
    pub url: String,
    /// Ask the provider for a markdown rendition as well.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_markdown: Option<bool>,
}

impl ScrapeRequest {
    /// Creates a scrape request for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            include_markdown: None,
        }
    }

    /// Requests markdown output.
    pub fn with_markdown(mut self, include: bool) -> Self {
        self.include_markdown = Some(include);
        self
    }

    /// Copy with surrounding whitespace stripped from the URL; adapters send
    /// and echo this form.
    pub(crate) fn normalized(&self) -> ScrapeRequest {
        ScrapeRequest {
            url: self.url.trim().to_string(),
            include_markdown: self.include_markdown,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(self.url.trim())
            .map_err(|e| SearchError::InvalidRequest(format!("Invalid URL '{}': {}", self.url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SearchError::InvalidRequest(format!(
                "Unsupported URL scheme '{}'",
                scheme
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_new() {
        let request = SearchRequest::new("rust ownership");
        assert_eq!(request.q, "rust ownership");
        assert_eq!(request.kind, OperationKind::Search);
        assert!(request.gl.is_none());
        assert!(request.num.is_none());
    }

    #[test]
    fn test_search_request_builder_chain() {
        let request = SearchRequest::new("rust")
            .with_kind(OperationKind::News)
            .with_country("de")
            .with_language("de")
            .with_location("Berlin")
            .with_num(5)
            .with_page(2)
            .with_tbs("qdr:d")
            .with_autocorrect(false);

        assert_eq!(request.kind, OperationKind::News);
        assert_eq!(request.gl.as_deref(), Some("de"));
        assert_eq!(request.hl.as_deref(), Some("de"));
        assert_eq!(request.location.as_deref(), Some("Berlin"));
        assert_eq!(request.num, Some(5));
        assert_eq!(request.page, Some(2));
        assert_eq!(request.tbs.as_deref(), Some("qdr:d"));
        assert_eq!(request.autocorrect, Some(false));
    }

    #[test]
    fn test_search_request_omits_unset_fields() {
        let request = SearchRequest::new("rust").with_kind(OperationKind::Images);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"q": "rust"}));
    }

    #[test]
    fn test_search_request_serializes_set_fields() {
        let request = SearchRequest::new("rust").with_country("us").with_num(3);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"q": "rust", "gl": "us", "num": 3}));
    }

    #[test]
    fn test_search_request_deserialization_defaults_kind() {
        let request: SearchRequest = serde_json::from_str(r#"{"q":"test","hl":"en"}"#).unwrap();
        assert_eq!(request.q, "test");
        assert_eq!(request.hl.as_deref(), Some("en"));
        assert_eq!(request.kind, OperationKind::Search);
    }

    #[test]
    fn test_search_request_validate() {
        assert!(SearchRequest::new("rust").validate().is_ok());
        assert!(matches!(
            SearchRequest::new(" \t\n").validate(),
            Err(SearchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_operation_kind_round_trip_names() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.as_str().parse::<OperationKind>().unwrap(), kind);
        }
        assert!("webpage".parse::<OperationKind>().is_err());
    }

    #[test]
    fn test_operation_kind_serialization() {
        let json = serde_json::to_string(&OperationKind::Scholar).unwrap();
        assert_eq!(json, "\"scholar\"");
    }

    #[test]
    fn test_scrape_request_serialization() {
        let json = serde_json::to_value(ScrapeRequest::new("https://example.com")).unwrap();
        assert_eq!(json, serde_json::json!({"url": "https://example.com"}));

        let json =
            serde_json::to_value(ScrapeRequest::new("https://example.com").with_markdown(true))
                .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "https://example.com", "includeMarkdown": true})
        );
    }

    #[test]
    fn test_scrape_request_validate() {
        assert!(ScrapeRequest::new("https://example.com/a?b=c").validate().is_ok());
        assert!(ScrapeRequest::new("not a url").validate().is_err());
        assert!(ScrapeRequest::new("ftp://example.com").validate().is_err());
        assert!(ScrapeRequest::new("").validate().is_err());
    }

    #[test]
    fn test_scrape_request_normalized() {
        let request = ScrapeRequest::new("  https://example.com/page \n").with_markdown(true);
        assert!(request.validate().is_ok());

        let normalized = request.normalized();
        assert_eq!(normalized.url, "https://example.com/page");
        assert_eq!(normalized.include_markdown, Some(true));
    }
}
