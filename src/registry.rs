//! Ordered provider lists built from configuration.

use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::provider::{Provider, ProviderConfig, ProviderKind, ScrapeProvider, SearchProvider};
use crate::providers::{
    brave, jina, serper, tavily, Brave, JinaScrape, JinaSearch, SerperScrape, SerperSearch, Tavily,
};

/// Search fallback order.
pub const SEARCH_PRIORITY: [ProviderKind; 4] = [
    ProviderKind::Serper,
    ProviderKind::Tavily,
    ProviderKind::Brave,
    ProviderKind::Jina,
];

/// Scrape fallback order.
pub const SCRAPE_PRIORITY: [ProviderKind; 2] = [ProviderKind::Serper, ProviderKind::Jina];

/// Builds the search adapters whose credentials are configured, in
/// [`SEARCH_PRIORITY`] order.
pub fn build_search_providers(settings: &Settings) -> Vec<Arc<dyn SearchProvider>> {
    SEARCH_PRIORITY
        .iter()
        .filter_map(|&kind| {
            let api_key = settings.api_key(kind)?;
            let provider: Arc<dyn SearchProvider> = match kind {
                ProviderKind::Serper => Arc::new(SerperSearch::from_config(config(
                    settings,
                    api_key,
                    serper::SEARCH_BASE_URL,
                ))),
                ProviderKind::Tavily => {
                    Arc::new(Tavily::from_config(config(settings, api_key, tavily::BASE_URL)))
                }
                ProviderKind::Brave => {
                    Arc::new(Brave::from_config(config(settings, api_key, brave::BASE_URL)))
                }
                ProviderKind::Jina => Arc::new(JinaSearch::from_config(config(
                    settings,
                    api_key,
                    jina::SEARCH_BASE_URL,
                ))),
            };
            Some(provider)
        })
        .collect()
}

/// Builds the scrape adapters whose credentials are configured, in
/// [`SCRAPE_PRIORITY`] order.
pub fn build_scrape_providers(settings: &Settings) -> Vec<Arc<dyn ScrapeProvider>> {
    SCRAPE_PRIORITY
        .iter()
        .filter_map(|&kind| {
            let api_key = settings.api_key(kind)?;
            let provider: Arc<dyn ScrapeProvider> = match kind {
                ProviderKind::Serper => Arc::new(SerperScrape::from_config(config(
                    settings,
                    api_key,
                    serper::SCRAPE_BASE_URL,
                ))),
                ProviderKind::Jina => Arc::new(JinaScrape::from_config(config(
                    settings,
                    api_key,
                    jina::SCRAPE_BASE_URL,
                ))),
                ProviderKind::Tavily | ProviderKind::Brave => return None,
            };
            Some(provider)
        })
        .collect()
}

fn config(settings: &Settings, api_key: &str, base_url: &str) -> ProviderConfig {
    ProviderConfig::new(api_key, base_url).with_timeout(settings.timeout())
}

/// Provider lists for both operations.
///
/// Built once at startup and shared by reference; the lists never change
/// afterwards.
#[derive(Clone, Default)]
pub struct Registry {
    search: Vec<Arc<dyn SearchProvider>>,
    scrape: Vec<Arc<dyn ScrapeProvider>>,
}

impl Registry {
    /// Creates a registry from explicit lists.
    pub fn new(search: Vec<Arc<dyn SearchProvider>>, scrape: Vec<Arc<dyn ScrapeProvider>>) -> Self {
        Self { search, scrape }
    }

    /// Builds both lists from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        let registry = Self::new(build_search_providers(settings), build_scrape_providers(settings));
        info!(
            "Configured search providers: [{}]; scrape providers: [{}]",
            registry.search_names().join(", "),
            registry.scrape_names().join(", ")
        );
        registry
    }

    /// Builds both lists from the process environment.
    pub fn from_env() -> Self {
        Self::from_settings(&Settings::from_env())
    }

    /// Search adapters in fallback order.
    pub fn search_providers(&self) -> &[Arc<dyn SearchProvider>] {
        &self.search
    }

    /// Scrape adapters in fallback order.
    pub fn scrape_providers(&self) -> &[Arc<dyn ScrapeProvider>] {
        &self.scrape
    }

    /// Names of the search adapters in fallback order.
    pub fn search_names(&self) -> Vec<&'static str> {
        self.search.iter().map(|p| p.name()).collect()
    }

    /// Names of the scrape adapters in fallback order.
    pub fn scrape_names(&self) -> Vec<&'static str> {
        self.scrape.iter().map(|p| p.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn all_keys() -> Settings {
        Settings::default()
            .with_api_key(ProviderKind::Jina, "jina")
            .with_api_key(ProviderKind::Brave, "brave")
            .with_api_key(ProviderKind::Tavily, "tavily")
            .with_api_key(ProviderKind::Serper, "serper")
    }

    #[test]
    fn test_no_credentials_no_providers() {
        let registry = Registry::from_settings(&Settings::default());
        assert!(registry.search_providers().is_empty());
        assert!(registry.scrape_providers().is_empty());
    }

    #[test]
    fn test_priority_order() {
        let registry = Registry::from_settings(&all_keys());
        assert_eq!(registry.search_names(), vec!["serper", "tavily", "brave", "jina"]);
        assert_eq!(registry.scrape_names(), vec!["serper", "jina"]);
    }

    #[test]
    fn test_missing_credentials_are_skipped() {
        let settings = Settings::default()
            .with_api_key(ProviderKind::Brave, "brave")
            .with_api_key(ProviderKind::Jina, "jina");
        let registry = Registry::from_settings(&settings);
        assert_eq!(registry.search_names(), vec!["brave", "jina"]);
        assert_eq!(registry.scrape_names(), vec!["jina"]);
    }

    #[test]
    fn test_search_only_credentials() {
        let settings = Settings::default().with_api_key(ProviderKind::Tavily, "tavily");
        let registry = Registry::from_settings(&settings);
        assert_eq!(registry.search_names(), vec!["tavily"]);
        assert!(registry.scrape_providers().is_empty());
    }

    #[test]
    fn test_blank_credential_is_absent() {
        let settings = Settings::default().with_api_key(ProviderKind::Serper, "   ");
        assert!(build_search_providers(&settings).is_empty());
    }

    #[test]
    fn test_build_is_idempotent() {
        let settings = all_keys();
        let first: Vec<_> = build_search_providers(&settings).iter().map(|p| p.name()).collect();
        let second: Vec<_> = build_search_providers(&settings).iter().map(|p| p.name()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_adapters_receive_settings() {
        let settings = all_keys().with_timeout(Duration::from_secs(7));
        let providers = build_search_providers(&settings);
        assert_eq!(providers[0].config().api_key, "serper");
        assert_eq!(providers[0].config().base_url, serper::SEARCH_BASE_URL);
        assert!(providers.iter().all(|p| p.config().timeout == Duration::from_secs(7)));

        let scrape = build_scrape_providers(&settings);
        assert_eq!(scrape[1].config().base_url, jina::SCRAPE_BASE_URL);
    }

    #[test]
    fn test_default_timeout() {
        let providers = build_scrape_providers(&all_keys());
        assert!(providers.iter().all(|p| p.config().timeout == Duration::from_secs(30)));
    }
}
