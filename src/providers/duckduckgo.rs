//! DuckDuckGo Instant Answer provider
//!
//! Free, keyless, and the terminal fallback of the search chain. The
//! instant-answer API returns an abstract plus related topics rather than a
//! ranked web result list, so results are thinner than the paid providers.

use crate::{
    config::ProviderConfig,
    error::Result,
    types::{SearchProvider, SearchResponse, SearchResult},
    utils::http::{build_url, last_path_segment, null_as_default, parse_json, HttpClient},
};
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;

const SOURCE: &str = "DuckDuckGo";
const MAX_RELATED_TOPICS: usize = 5;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct InstantAnswer {
    #[serde(deserialize_with = "null_as_default")]
    heading: String,
    #[serde(deserialize_with = "null_as_default")]
    abstract_text: String,
    #[serde(rename = "AbstractURL", deserialize_with = "null_as_default")]
    abstract_url: String,
    #[serde(deserialize_with = "null_as_default")]
    related_topics: Vec<RelatedTopic>,
}

/// Either a plain topic or a named group of topics; groups carry no `Text`
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct RelatedTopic {
    #[serde(deserialize_with = "null_as_default")]
    text: String,
    #[serde(rename = "FirstURL", deserialize_with = "null_as_default")]
    first_url: String,
}

/// DuckDuckGo search provider
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    base_url: String,
    http_client: HttpClient,
}

impl DuckDuckGoProvider {
    pub fn new(config: &ProviderConfig, http_client: HttpClient) -> Self {
        Self {
            base_url: config.base_url.clone(),
            http_client,
        }
    }

    fn parse_results(body: &str) -> Result<Vec<SearchResult>> {
        let answer: InstantAnswer = parse_json(body)?;
        let mut results = Vec::new();

        if !answer.abstract_text.is_empty() {
            let title = if answer.heading.is_empty() {
                "Answer".to_string()
            } else {
                answer.heading
            };
            results.push(SearchResult::new(title, answer.abstract_text, answer.abstract_url));
        }

        for topic in answer.related_topics.into_iter().take(MAX_RELATED_TOPICS) {
            if topic.text.is_empty() {
                continue;
            }
            let title = last_path_segment(&topic.first_url).unwrap_or_else(|| "Result".to_string());
            results.push(SearchResult::new(title, topic.text, topic.first_url));
        }

        Ok(results)
    }
}

#[async_trait::async_trait]
impl SearchProvider for DuckDuckGoProvider {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    fn source(&self) -> &str {
        SOURCE
    }

    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = build_url(
            &self.base_url,
            &[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ],
        )
        .map_err(|e| e.for_provider(SOURCE))?;

        debug!("DuckDuckGo request: {url}");

        let body = self
            .http_client
            .get_text(&url)
            .await
            .map_err(|e| e.for_provider(SOURCE))?;

        let results = Self::parse_results(&body).map_err(|e| e.for_provider(SOURCE))?;
        debug!("DuckDuckGo returned {} results", results.len());

        Ok(SearchResponse::new(query, results, SOURCE))
    }

    fn config(&self) -> HashMap<String, String> {
        let mut config = HashMap::new();
        config.insert("provider".to_string(), "duckduckgo".to_string());
        config.insert("base_url".to_string(), self.base_url.clone());
        config
    }
}
