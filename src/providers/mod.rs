//! Search provider implementations

pub mod duckduckgo;
pub mod serper;
pub mod tavily;

// Re-export providers for convenience
pub use duckduckgo::DuckDuckGoProvider;
pub use serper::SerperProvider;
pub use tavily::TavilyProvider;
