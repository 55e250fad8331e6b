//! Error types for provider calls and fallback orchestration.

use thiserror::Error;

use crate::Operation;

/// Result type alias for search and scrape operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search and scrape operations.
///
/// Errors split into two classes. Transient errors ([`SearchError::is_transient`])
/// are failures of a single provider (network, timeout, HTTP status) and make
/// the orchestrator move on to the next provider. Everything else stops the
/// traversal immediately.
#[derive(Error, Debug)]
pub enum SearchError {
    /// No providers are configured for the operation.
    #[error("No {0} providers configured")]
    NoProviders(Operation),

    /// Provider answered with a failure status.
    #[error("{provider} returned HTTP {status}: {body}")]
    Http {
        provider: String,
        status: u16,
        body: String,
    },

    /// Connection, request or body transfer failed.
    #[error("{provider} request failed: {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// The per-call timeout elapsed.
    #[error("{provider} request timed out")]
    Timeout { provider: String },

    /// Response body could not be decoded.
    #[error("Failed to decode {provider} response: {message}")]
    Decode { provider: String, message: String },

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// Result could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Every provider failed transiently; carries the last failure.
    #[error("All {attempts} {operation} providers failed, last error: {source}")]
    Exhausted {
        operation: Operation,
        attempts: usize,
        #[source]
        source: Box<SearchError>,
    },
}

impl SearchError {
    /// Returns whether the error is a provider-local failure eligible for
    /// fallback to the next provider.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SearchError::Http { .. } | SearchError::Network { .. } | SearchError::Timeout { .. }
        )
    }

    /// Classifies a reqwest error raised while talking to `provider`.
    pub fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout {
                provider: provider.to_string(),
            }
        } else if err.is_builder() {
            SearchError::Client(err)
        } else if err.is_decode() {
            SearchError::Decode {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        } else {
            SearchError::Network {
                provider: provider.to_string(),
                source: err,
            }
        }
    }

    /// Returns the HTTP status carried by the error, looking through
    /// [`SearchError::Exhausted`].
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::Http { status, .. } => Some(*status),
            SearchError::Exhausted { source, .. } => source.status(),
            _ => None,
        }
    }
}
