//! Environment-sourced settings.

use std::time::Duration;

use tracing::warn;

use crate::provider::{ProviderKind, DEFAULT_TIMEOUT};

/// Variable overriding the per-call timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "SEARCH_TIMEOUT_SECS";

/// Older name for [`TIMEOUT_ENV`], read when the primary one is unset.
pub const TIMEOUT_ENV_ALIAS: &str = "AIOHTTP_TIMEOUT";

/// Provider credentials and timeout.
///
/// Credentials are trimmed; blank values count as absent.
#[derive(Clone, Default)]
pub struct Settings {
    pub serper_api_key: Option<String>,
    pub tavily_api_key: Option<String>,
    pub brave_api_key: Option<String>,
    pub jina_api_key: Option<String>,
    /// Per-call timeout override.
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = |kind: ProviderKind| normalize_key(lookup(kind.env_var()));

        Self {
            serper_api_key: key(ProviderKind::Serper),
            tavily_api_key: key(ProviderKind::Tavily),
            brave_api_key: key(ProviderKind::Brave),
            jina_api_key: key(ProviderKind::Jina),
            timeout: [TIMEOUT_ENV, TIMEOUT_ENV_ALIAS]
                .into_iter()
                .find_map(|name| lookup(name).map(|raw| (name, raw)))
                .and_then(|(name, raw)| parse_timeout(name, &raw)),
        }
    }

    /// Returns the credential for `kind`, if configured.
    pub fn api_key(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::Serper => self.serper_api_key.as_deref(),
            ProviderKind::Tavily => self.tavily_api_key.as_deref(),
            ProviderKind::Brave => self.brave_api_key.as_deref(),
            ProviderKind::Jina => self.jina_api_key.as_deref(),
        }
    }

    /// Sets the credential for `kind`.
    pub fn with_api_key(mut self, kind: ProviderKind, api_key: impl Into<String>) -> Self {
        let api_key = normalize_key(Some(api_key.into()));
        match kind {
            ProviderKind::Serper => self.serper_api_key = api_key,
            ProviderKind::Tavily => self.tavily_api_key = api_key,
            ProviderKind::Brave => self.brave_api_key = api_key,
            ProviderKind::Jina => self.jina_api_key = api_key,
        }
        self
    }

    /// Sets the timeout override.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the effective per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let set = |key: &Option<String>| if key.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Settings")
            .field("serper_api_key", &set(&self.serper_api_key))
            .field("tavily_api_key", &set(&self.tavily_api_key))
            .field("brave_api_key", &set(&self.brave_api_key))
            .field("jina_api_key", &set(&self.jina_api_key))
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn normalize_key(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_timeout(name: &str, raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            warn!("Ignoring invalid {} value '{}'", name, raw);
            None
        }
    }
}
