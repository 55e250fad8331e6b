//! Sequential multi-provider fallback.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, info, warn};

use crate::provider::{Operation, Provider, ScrapeProvider, SearchProvider};
use crate::{
    Registry, Result, ScrapeRequest, ScrapeResponse, SearchError, SearchRequest, SearchResponse,
};

/// Drives `call` over `providers` in order until one succeeds.
///
/// Transient failures move on to the next provider; any other failure is
/// returned as is without trying the rest. When every provider fails
/// transiently the last failure is wrapped in [`SearchError::Exhausted`].
/// Providers are tried strictly one at a time.
pub async fn execute<'a, P, T, F>(operation: Operation, providers: &'a [Arc<P>], mut call: F) -> Result<T>
where
    P: Provider + ?Sized,
    F: FnMut(&'a P) -> BoxFuture<'a, Result<T>>,
{
    if providers.is_empty() {
        return Err(SearchError::NoProviders(operation));
    }

    let mut last_error = None;
    let mut failures = 0;

    for provider in providers {
        let name = provider.name();
        debug!("Trying {} provider {}", operation, name);

        match call(provider.as_ref()).await {
            Ok(value) => {
                if failures > 0 {
                    info!("{} served {} after {} failed attempt(s)", name, operation, failures);
                }
                return Ok(value);
            }
            Err(e) if e.is_transient() => {
                warn!("{} provider {} failed: {}", operation, name, e);
                failures += 1;
                last_error = Some(e);
            }
            Err(e) => {
                warn!("{} provider {} failed fatally: {}", operation, name, e);
                return Err(e);
            }
        }
    }

    match last_error {
        Some(source) => Err(SearchError::Exhausted {
            operation,
            attempts: failures,
            source: Box::new(source),
        }),
        None => Err(SearchError::NoProviders(operation)),
    }
}

/// Runs a search over `providers` with fallback.
pub async fn execute_search(
    providers: &[Arc<dyn SearchProvider>],
    request: &SearchRequest,
) -> Result<SearchResponse> {
    if providers.is_empty() {
        return Err(SearchError::NoProviders(Operation::Search));
    }
    request.validate()?;

    execute(Operation::Search, providers, |provider| provider.search(request)).await
}

/// Runs a scrape over `providers` with fallback.
pub async fn execute_scrape(
    providers: &[Arc<dyn ScrapeProvider>],
    request: &ScrapeRequest,
) -> Result<ScrapeResponse> {
    if providers.is_empty() {
        return Err(SearchError::NoProviders(Operation::Scrape));
    }
    request.validate()?;

    execute(Operation::Scrape, providers, |provider| provider.scrape(request)).await
}

/// Fallback orchestrator bound to a [`Registry`].
///
/// Cheap to clone; concurrent operations each traverse the lists on their own.
#[derive(Clone)]
pub struct Fallback {
    registry: Arc<Registry>,
}

impl Fallback {
    /// Creates an orchestrator over `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Returns the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Searches with the configured search providers.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        execute_search(self.registry.search_providers(), request).await
    }

    /// Scrapes with the configured scrape providers.
    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse> {
        execute_scrape(self.registry.scrape_providers(), request).await
    }
}
