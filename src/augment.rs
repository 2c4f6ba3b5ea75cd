//! Chat augmentation: classify, rewrite, search, format
//!
//! A failed search never fails the chat turn. The caller gets an augmentation
//! with `search_performed == false` and answers without web context.

use crate::{
    classifier::{matched_trigger, should_search},
    format::format_search_results_for_prompt,
    orchestrator::WebSearch,
    rewriter::extract_search_query,
};
use log::{info, warn};
use serde::Serialize;

/// Outcome of running a chat message through the search pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAugmentation {
    /// The user message, unchanged
    pub message: String,
    pub search_performed: bool,
    /// Rewritten query, set whenever a search was attempted
    pub query: Option<String>,
    /// Rendered results block, set when the search succeeded
    pub search_context: Option<String>,
    pub should_enrich_prompt: bool,
}

impl ChatAugmentation {
    fn without_search(message: &str, query: Option<String>) -> Self {
        Self {
            message: message.to_string(),
            search_performed: false,
            query,
            search_context: None,
            should_enrich_prompt: false,
        }
    }

    /// Prepend the search context to `prompt` when enrichment applies
    pub fn enrich_prompt(&self, prompt: &str) -> String {
        match (&self.search_context, self.should_enrich_prompt) {
            (Some(context), true) => format!("{context}\n{prompt}"),
            _ => prompt.to_string(),
        }
    }
}

/// Run the augmentation pipeline for one chat message
pub async fn augment_message(
    search: &WebSearch,
    message: &str,
    auto_search: bool,
) -> ChatAugmentation {
    if !auto_search || !should_search(message) {
        return ChatAugmentation::without_search(message, None);
    }

    let query = extract_search_query(message);
    info!(
        "Automatic search triggered by '{}': {query}",
        matched_trigger(message).unwrap_or_default()
    );

    match search.search(&query).await {
        Ok(response) => {
            let context = format_search_results_for_prompt(&response);
            info!(
                "Web context added ({} results from {})",
                response.results.len(),
                response.source
            );
            ChatAugmentation {
                message: message.to_string(),
                search_performed: true,
                query: Some(query),
                should_enrich_prompt: !context.is_empty(),
                search_context: Some(context),
            }
        }
        Err(error) => {
            warn!("Search failed, continuing without web context: {error}");
            ChatAugmentation::without_search(message, Some(query))
        }
    }
}
