//! Core types and traits for the search subsystem

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A normalized web search result, whatever provider it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the result
    pub title: String,
    /// Snippet/description text
    pub snippet: String,
    /// URL of the result; empty for synthesized answers
    #[serde(default)]
    pub url: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
        }
    }
}

/// Results of one successful provider call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Always true for responses produced by a provider; failures travel as errors
    pub success: bool,
    /// The query that was sent
    pub query: String,
    /// Results in rank order
    pub results: Vec<SearchResult>,
    /// Display label of the provider, e.g. "Tavily AI"
    pub source: String,
}

impl SearchResponse {
    /// Build a successful response
    pub fn new(
        query: impl Into<String>,
        results: Vec<SearchResult>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            query: query.into(),
            results,
            source: source.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Trait that all search provider implementations must satisfy
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync + std::fmt::Debug {
    /// Short machine name of the provider ("tavily", "serper", "duckduckgo")
    fn name(&self) -> &str;

    /// Human-readable label reported as `SearchResponse::source`
    fn source(&self) -> &str;

    /// Run one search
    async fn search(&self, query: &str) -> Result<SearchResponse>;

    /// Get provider configuration (for debugging/logging)
    fn config(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_successful_even_when_empty() {
        let response = SearchResponse::new("rust", vec![], "DuckDuckGo");
        assert!(response.success);
        assert!(response.is_empty());
        assert_eq!(response.source, "DuckDuckGo");
    }

    #[test]
    fn test_result_url_defaults_to_empty_on_deserialize() {
        let result: SearchResult =
            serde_json::from_str(r#"{"title": "Answer", "snippet": "42"}"#).unwrap();
        assert_eq!(result.url, "");
    }
}
