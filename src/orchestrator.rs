//! Provider fallback chain
//!
//! Providers are tried one at a time in priority order. The first success is
//! returned as-is; failures are logged and the next provider is tried. Only
//! when every provider, the keyless terminal one included, has failed does an
//! error reach the caller.

use crate::{
    config::SearchConfig,
    error::{ProviderFailure, Result, SearchError},
    providers::{DuckDuckGoProvider, SerperProvider, TavilyProvider},
    types::{SearchProvider, SearchResponse},
    utils::http::HttpClient,
};
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::timeout;

/// Ordered provider chain with a per-attempt deadline
#[derive(Debug)]
pub struct WebSearch {
    providers: Vec<Box<dyn SearchProvider>>,
    timeout_per_provider: Duration,
}

impl WebSearch {
    /// Build the standard chain: Tavily, then Serper, then DuckDuckGo.
    ///
    /// Tavily and Serper are only included when enabled and holding a key, so
    /// a gated provider is never attempted. DuckDuckGo is always last.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let http_client = HttpClient::new(config.timeout)?;

        let mut providers: Vec<Box<dyn SearchProvider>> = Vec::with_capacity(3);

        if config.tavily.is_usable() {
            providers.push(Box::new(TavilyProvider::new(
                &config.tavily,
                config.max_results,
                http_client.clone(),
            )));
        } else {
            debug!(
                "Tavily skipped (enabled: {}, key present: {})",
                config.tavily.enabled,
                config.tavily.api_key.is_some()
            );
        }

        if config.serper.is_usable() {
            providers.push(Box::new(SerperProvider::new(
                &config.serper,
                config.max_results,
                http_client.clone(),
            )));
        } else {
            debug!(
                "Serper skipped (enabled: {}, key present: {})",
                config.serper.enabled,
                config.serper.api_key.is_some()
            );
        }

        providers.push(Box::new(DuckDuckGoProvider::new(&config.duckduckgo, http_client)));

        Ok(Self::with_providers(providers, config.timeout))
    }

    /// Use an explicit chain, tried in the given order
    pub fn with_providers(
        providers: Vec<Box<dyn SearchProvider>>,
        timeout_per_provider: Duration,
    ) -> Self {
        Self {
            providers,
            timeout_per_provider,
        }
    }

    /// Names of the providers in the order they are tried
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Search with fallback; the first provider to succeed wins
    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        let mut attempts = Vec::new();

        for provider in &self.providers {
            debug!("Trying search provider {}", provider.name());

            match self.search_single_provider(provider.as_ref(), query).await {
                Ok(response) => {
                    info!(
                        "Search via {} returned {} results",
                        response.source,
                        response.results.len()
                    );
                    return Ok(response);
                }
                Err(error) => {
                    warn!(
                        "{} failed, falling back: {} ({})",
                        provider.name(),
                        error,
                        troubleshooting_hint(provider.name(), &error)
                    );
                    attempts.push(ProviderFailure {
                        provider: provider.name().to_string(),
                        error,
                    });
                }
            }
        }

        Err(SearchError::ExhaustedProviders { attempts })
    }

    async fn search_single_provider(
        &self,
        provider: &dyn SearchProvider,
        query: &str,
    ) -> Result<SearchResponse> {
        match timeout(self.timeout_per_provider, provider.search(query)).await {
            Ok(result) => result,
            Err(_) => Err(SearchError::Timeout {
                timeout_ms: self.timeout_per_provider.as_millis() as u64,
            }),
        }
    }
}

/// Run one search through the standard chain built from `config`
pub async fn web_search(config: &SearchConfig, query: &str) -> Result<SearchResponse> {
    WebSearch::from_config(config)?.search(query).await
}

/// Human hint for a provider failure, used in fallback log lines
pub fn troubleshooting_hint(provider_name: &str, error: &SearchError) -> String {
    let by_status = match error {
        SearchError::HttpError {
            status_code: Some(401 | 403),
            ..
        } => Some("This is likely an authentication issue. Check the API key."),
        SearchError::HttpError {
            status_code: Some(429),
            ..
        } => Some("Rate limit exceeded. Try again later or reduce request frequency."),
        SearchError::HttpError {
            status_code: Some(500..=599),
            ..
        } => Some("The search provider is experiencing server issues. Try again later."),
        SearchError::Timeout { .. } => Some("The provider did not answer in time."),
        _ => None,
    };

    if let Some(hint) = by_status {
        return hint.to_string();
    }

    match provider_name {
        "tavily" => "Check that TAVILY_API_KEY is valid and the account has credits.".to_string(),
        "serper" => "Check that SERPER_API_KEY is valid and the account has credits.".to_string(),
        "duckduckgo" => {
            "DuckDuckGo may be throttling requests; reduce request frequency.".to_string()
        }
        _ => format!("Check the {provider_name} configuration."),
    }
}
