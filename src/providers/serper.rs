//! Serper.dev provider (Google results over a JSON API)

use crate::{
    config::ProviderConfig,
    error::{Result, SearchError},
    types::{SearchProvider, SearchResponse, SearchResult},
    utils::http::{null_as_default, parse_json, HttpClient},
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const SOURCE: &str = "Google (Serper)";

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SerperResponse {
    #[serde(deserialize_with = "null_as_default")]
    organic: Vec<SerperOrganicResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SerperOrganicResult {
    #[serde(deserialize_with = "null_as_default")]
    title: String,
    #[serde(deserialize_with = "null_as_default")]
    link: String,
    #[serde(deserialize_with = "null_as_default")]
    snippet: String,
}

/// Serper.dev search provider
#[derive(Debug, Clone)]
pub struct SerperProvider {
    api_key: Option<String>,
    base_url: String,
    num_results: u32,
    http_client: HttpClient,
}

impl SerperProvider {
    /// Build from config; a missing key is only reported when searching
    pub fn new(config: &ProviderConfig, num_results: u32, http_client: HttpClient) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            num_results,
            http_client,
        }
    }

    fn parse_results(body: &str) -> Result<Vec<SearchResult>> {
        let response: SerperResponse = parse_json(body)?;

        Ok(response
            .organic
            .into_iter()
            .map(|r| SearchResult::new(r.title, r.snippet, r.link))
            .collect())
    }
}

#[async_trait::async_trait]
impl SearchProvider for SerperProvider {
    fn name(&self) -> &str {
        "serper"
    }

    fn source(&self) -> &str {
        SOURCE
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SearchError::ConfigError("SERPER_API_KEY is not configured".to_string())
                .for_provider(SOURCE)
        })?;

        let request = SerperRequest {
            q: query,
            num: self.num_results,
        };

        let mut headers = HashMap::new();
        headers.insert("X-API-KEY".to_string(), api_key.to_string());

        debug!("Serper request: q={query}, num={}", self.num_results);

        let body = self
            .http_client
            .post_json_text(&self.base_url, &request, headers)
            .await
            .map_err(|e| e.for_provider(SOURCE))?;

        let results = Self::parse_results(&body).map_err(|e| e.for_provider(SOURCE))?;
        debug!("Serper returned {} results", results.len());

        Ok(SearchResponse::new(query, results, SOURCE))
    }

    fn config(&self) -> HashMap<String, String> {
        let mut config = HashMap::new();
        config.insert("provider".to_string(), "serper".to_string());
        config.insert(
            "api_key".to_string(),
            if self.api_key.is_some() { "***" } else { "<missing>" }.to_string(),
        );
        config.insert("base_url".to_string(), self.base_url.clone());
        config.insert("num".to_string(), self.num_results.to_string());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SERPER_BASE_URL;
    use std::time::Duration;

    fn provider(api_key: Option<&str>) -> SerperProvider {
        let config = ProviderConfig::new(true, api_key.map(str::to_string), SERPER_BASE_URL);
        SerperProvider::new(&config, 5, HttpClient::new(Duration::from_secs(1)).unwrap())
    }

    #[test]
    fn test_parse_organic() {
        let body = r#"{
            "searchParameters": {"q": "rust"},
            "organic": [
                {"title": "Rust", "link": "https://www.rust-lang.org/", "snippet": "A language", "position": 1},
                {"title": "No snippet", "link": "https://example.com/"}
            ]
        }"#;
        let results = SerperProvider::parse_results(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0],
            SearchResult::new("Rust", "A language", "https://www.rust-lang.org/")
        );
        assert_eq!(results[1].snippet, "");
    }

    #[test]
    fn test_null_fields_keep_the_entry() {
        let body = r#"{"organic": [
            {"title": "A", "link": "https://a.example", "snippet": null},
            {"title": "B", "link": "https://b.example", "snippet": "ok"}
        ]}"#;
        let results = SerperProvider::parse_results(body).unwrap();
        assert_eq!(
            results,
            vec![
                SearchResult::new("A", "", "https://a.example"),
                SearchResult::new("B", "ok", "https://b.example"),
            ]
        );
        assert!(SerperProvider::parse_results(r#"{"organic": null}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_organic_is_empty() {
        assert!(SerperProvider::parse_results(r#"{"knowledgeGraph": {}}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_non_object_body_is_parse_error() {
        assert!(matches!(
            SerperProvider::parse_results("[1, 2]"),
            Err(SearchError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_fast() {
        let err = provider(None).search("rust").await.unwrap_err();
        match err {
            SearchError::ConfigError(msg) => {
                assert!(msg.contains("Serper"));
                assert!(msg.contains("SERPER_API_KEY"));
            }
            other => panic!("Expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_config_masks_key() {
        let config = provider(Some("secret")).config();
        assert_eq!(config.get("api_key"), Some(&"***".to_string()));
        assert_eq!(config.get("provider"), Some(&"serper".to_string()));
    }
}
