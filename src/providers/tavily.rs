//! Tavily Search API provider
//!
//! Tavily is a search API built for LLM agents. Besides ranked results it can
//! return a synthesized answer, which we pin as the first result.

use crate::{
    config::ProviderConfig,
    error::{Result, SearchError},
    types::{SearchProvider, SearchResponse, SearchResult},
    utils::http::{null_as_default, parse_json, HttpClient},
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const SOURCE: &str = "Tavily AI";

/// Title given to Tavily's synthesized answer
pub const ANSWER_TITLE: &str = "Synthesized answer";

/// Tavily search request structure
#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    include_answer: bool,
    max_results: u32,
}

/// Tavily API response structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TavilyResponse {
    answer: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    results: Vec<TavilySearchResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TavilySearchResult {
    #[serde(deserialize_with = "null_as_default")]
    title: String,
    #[serde(deserialize_with = "null_as_default")]
    url: String,
    #[serde(deserialize_with = "null_as_default")]
    content: String,
}

/// Tavily Search API provider
#[derive(Debug, Clone)]
pub struct TavilyProvider {
    api_key: Option<String>,
    base_url: String,
    max_results: u32,
    http_client: HttpClient,
}

impl TavilyProvider {
    pub fn new(config: &ProviderConfig, max_results: u32, http_client: HttpClient) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            max_results,
            http_client,
        }
    }

    fn parse_results(body: &str) -> Result<Vec<SearchResult>> {
        let response: TavilyResponse = parse_json(body)?;

        let mut results: Vec<SearchResult> = Vec::with_capacity(response.results.len() + 1);
        if let Some(answer) = response.answer.filter(|a| !a.is_empty()) {
            results.push(SearchResult::new(ANSWER_TITLE, answer, ""));
        }
        results.extend(
            response
                .results
                .into_iter()
                .map(|r| SearchResult::new(r.title, r.content, r.url)),
        );

        Ok(results)
    }
}

#[async_trait::async_trait]
impl SearchProvider for TavilyProvider {
    fn name(&self) -> &str {
        "tavily"
    }

    fn source(&self) -> &str {
        SOURCE
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SearchError::ConfigError("TAVILY_API_KEY is not configured".to_string())
                .for_provider(SOURCE)
        })?;

        let request = TavilyRequest {
            api_key,
            query,
            search_depth: "basic",
            include_answer: true,
            max_results: self.max_results,
        };

        debug!("Tavily request: query={query}, max_results={}", self.max_results);

        let body = self
            .http_client
            .post_json_text(&self.base_url, &request, HashMap::new())
            .await
            .map_err(|e| e.for_provider(SOURCE))?;

        let results = Self::parse_results(&body).map_err(|e| e.for_provider(SOURCE))?;
        debug!("Tavily returned {} results", results.len());

        Ok(SearchResponse::new(query, results, SOURCE))
    }

    fn config(&self) -> HashMap<String, String> {
        let mut config = HashMap::new();
        config.insert("provider".to_string(), "tavily".to_string());
        config.insert(
            "api_key".to_string(),
            if self.api_key.is_some() { "***" } else { "<missing>" }.to_string(),
        );
        config.insert("base_url".to_string(), self.base_url.clone());
        config.insert("search_depth".to_string(), "basic".to_string());
        config.insert("max_results".to_string(), self.max_results.to_string());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TAVILY_BASE_URL;
    use std::time::Duration;

    #[test]
    fn test_answer_is_pinned_first() {
        let body = r#"{
            "answer": "Rust is a systems programming language.",
            "query": "rust",
            "results": [
                {"title": "Rust", "url": "https://www.rust-lang.org/", "content": "Fast and safe", "score": 0.9}
            ]
        }"#;
        let results = TavilyProvider::parse_results(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, ANSWER_TITLE);
        assert_eq!(results[0].url, "");
        assert_eq!(
            results[1],
            SearchResult::new("Rust", "Fast and safe", "https://www.rust-lang.org/")
        );
    }

    #[test]
    fn test_null_or_empty_answer_is_skipped() {
        let results =
            TavilyProvider::parse_results(r#"{"answer": null, "results": []}"#).unwrap();
        assert!(results.is_empty());
        let results = TavilyProvider::parse_results(r#"{"answer": "", "results": []}"#).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_null_fields_keep_the_entry() {
        let body = r#"{"answer": null, "results": [
            {"title": null, "url": "https://a.example", "content": "first"},
            {"title": "B", "url": null, "content": null}
        ]}"#;
        let results = TavilyProvider::parse_results(body).unwrap();
        assert_eq!(
            results,
            vec![
                SearchResult::new("", "first", "https://a.example"),
                SearchResult::new("B", "", ""),
            ]
        );
        assert!(TavilyProvider::parse_results(r#"{"results": null}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            TavilyProvider::parse_results("oops"),
            Err(SearchError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_fast() {
        let config = ProviderConfig::new(true, None, TAVILY_BASE_URL);
        let provider =
            TavilyProvider::new(&config, 5, HttpClient::new(Duration::from_secs(1)).unwrap());
        match provider.search("rust").await {
            Err(SearchError::ConfigError(msg)) => assert!(msg.contains("Tavily")),
            other => panic!("Expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_provider_name_and_source() {
        let config = ProviderConfig::new(false, Some("tvly-x".to_string()), TAVILY_BASE_URL);
        let provider =
            TavilyProvider::new(&config, 5, HttpClient::new(Duration::from_secs(1)).unwrap());
        assert_eq!(provider.name(), "tavily");
        assert_eq!(provider.source(), "Tavily AI");
        assert_eq!(provider.config().get("api_key"), Some(&"***".to_string()));
    }
}
