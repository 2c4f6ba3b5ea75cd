//! Error types for the web-search subsystem

use std::fmt;
use thiserror::Error;

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// One failed provider attempt, kept for the exhausted-chain report
#[derive(Debug, Clone)]
pub struct ProviderFailure {
    /// Provider name (e.g. "serper")
    pub provider: String,
    /// What went wrong
    pub error: SearchError,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

/// Error types for search operations
#[derive(Error, Debug, Clone)]
pub enum SearchError {
    /// HTTP request failed (transport error or non-success status)
    #[error("HTTP request failed: {message}")]
    HttpError {
        message: String,
        status_code: Option<u16>,
        response_body: Option<String>,
    },

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider misconfigured, e.g. API key missing
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Response body was not the JSON shape we expected
    #[error("Parsing error: {0}")]
    ParseError(String),

    /// Timeout error
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Every provider in the chain failed, the terminal fallback included
    #[error("All search providers failed: {}", format_attempts(.attempts))]
    ExhaustedProviders { attempts: Vec<ProviderFailure> },
}

fn format_attempts(attempts: &[ProviderFailure]) -> String {
    if attempts.is_empty() {
        return "no providers configured".to_string();
    }
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SearchError {
    /// True for failures that happened on the wire (connection, status, timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, SearchError::HttpError { .. } | SearchError::Timeout { .. })
    }

    /// Prefix the message with the provider that produced the error
    pub fn for_provider(self, provider: &str) -> Self {
        match self {
            SearchError::HttpError {
                message,
                status_code,
                response_body,
            } => SearchError::HttpError {
                message: format!("{provider}: {message}"),
                status_code,
                response_body,
            },
            SearchError::ParseError(msg) => SearchError::ParseError(format!("{provider}: {msg}")),
            SearchError::ConfigError(msg) => SearchError::ConfigError(format!("{provider}: {msg}")),
            SearchError::InvalidInput(msg) => {
                SearchError::InvalidInput(format!("{provider}: {msg}"))
            }
            other => other,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SearchError::Timeout {
                timeout_ms: 15000, // Default timeout
            }
        } else if error.is_decode() {
            SearchError::ParseError(error.to_string())
        } else {
            SearchError::HttpError {
                message: error.to_string(),
                status_code: error.status().map(|s| s.as_u16()),
                response_body: None,
            }
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(error: serde_json::Error) -> Self {
        SearchError::ParseError(format!("JSON parsing failed: {error}"))
    }
}

impl From<url::ParseError> for SearchError {
    fn from(error: url::ParseError) -> Self {
        SearchError::ConfigError(format!("Invalid URL: {error}"))
    }
}
