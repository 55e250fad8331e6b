//! Per-call HTTP plumbing shared by the adapters.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::provider::ProviderConfig;
use crate::{Result, SearchError};

const USER_AGENT: &str = concat!("a3s-search-mcp/", env!("CARGO_PKG_VERSION"));

/// Longest error body kept in [`SearchError::Http`].
const MAX_ERROR_BODY: usize = 512;

/// Builds a client scoped to a single call.
///
/// The client (and its connection pool) is dropped when the call returns, on
/// success and failure alike.
pub(crate) fn client(config: &ProviderConfig) -> Result<Client> {
    Client::builder()
        .use_rustls_tls()
        .user_agent(USER_AGENT)
        .timeout(config.timeout)
        .build()
        .map_err(SearchError::Client)
}

/// Sends `request` and decodes a JSON body of type `T`.
///
/// Failure statuses become [`SearchError::Http`] carrying the body; a body
/// that does not decode becomes [`SearchError::Decode`].
pub(crate) async fn send_json<T: DeserializeOwned>(provider: &str, request: RequestBuilder) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| SearchError::from_reqwest(provider, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| SearchError::from_reqwest(provider, e))?;

    debug!("{} answered HTTP {} ({} bytes)", provider, status.as_u16(), body.len());

    if status.is_client_error() || status.is_server_error() {
        return Err(SearchError::Http {
            provider: provider.to_string(),
            status: status.as_u16(),
            body: truncate(body.trim(), MAX_ERROR_BODY),
        });
    }

    decode(provider, &body)
}

/// Decodes a JSON body, mapping failures to [`SearchError::Decode`].
pub(crate) fn decode<T: DeserializeOwned>(provider: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| SearchError::Decode {
        provider: provider.to_string(),
        message: e.to_string(),
    })
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_client_builds() {
        let config = ProviderConfig::new("key", "https://api.example.com");
        assert!(client(&config).is_ok());
    }

    #[test]
    fn test_decode_valid_json() {
        let value: Value = decode("serper", r#"{"organic": []}"#).unwrap();
        assert!(value.get("organic").is_some());
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode::<Value>("serper", "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SearchError::Decode { ref provider, .. } if provider == "serper"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_long_multibyte() {
        let s = "é".repeat(20);
        let truncated = truncate(&s, 5);
        assert_eq!(truncated, format!("{}...", "é".repeat(5)));
    }
}
