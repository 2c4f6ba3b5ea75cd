//! # yevedia-search
//!
//! Web-search augmentation for a local chat backend. Given a user message the
//! crate decides whether a web search is worth doing, rewrites the message into
//! a search query, runs it against a chain of providers (Tavily, Serper,
//! DuckDuckGo) with fallback, and renders the results as a text block to put in
//! front of the model prompt.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yevedia_search::{
//!     extract_search_query, format_search_results_for_prompt, should_search, SearchConfig,
//!     WebSearch,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SearchConfig::from_env()?;
//!     let search = WebSearch::from_config(&config)?;
//!
//!     let message = "Cherche la météo à Paris";
//!     if should_search(message) {
//!         let response = search.search(&extract_search_query(message)).await?;
//!         println!("{}", format_search_results_for_prompt(&response));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod augment;
pub mod classifier;
pub mod config;
pub mod error;
pub mod format;
pub mod orchestrator;
pub mod providers;
pub mod rewriter;
pub mod types;
pub mod utils;

// Re-export common types
pub use augment::{augment_message, ChatAugmentation};
pub use classifier::should_search;
pub use config::{ProviderConfig, SearchConfig};
pub use error::{Result, SearchError};
pub use format::format_search_results_for_prompt;
pub use orchestrator::{web_search, WebSearch};
pub use rewriter::extract_search_query;
pub use types::{SearchProvider, SearchResponse, SearchResult};
