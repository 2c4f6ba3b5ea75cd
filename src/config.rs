//! Provider configuration
//!
//! Read once at startup from the environment plus built-in defaults, then
//! shared by reference. Nothing mutates it after construction.

use crate::error::{Result, SearchError};
use std::env;
use std::time::Duration;

pub const DUCKDUCKGO_BASE_URL: &str = "https://api.duckduckgo.com/";
pub const SERPER_BASE_URL: &str = "https://google.serper.dev/search";
pub const TAVILY_BASE_URL: &str = "https://api.tavily.com/search";

pub const SERPER_API_KEY_ENV: &str = "SERPER_API_KEY";
pub const TAVILY_API_KEY_ENV: &str = "TAVILY_API_KEY";
pub const TIMEOUT_ENV: &str = "WEB_SEARCH_TIMEOUT_MS";

pub const DEFAULT_TIMEOUT_MS: u64 = 15000;
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// Serper key baked in at build time, used when `SERPER_API_KEY` is unset
const DEFAULT_SERPER_API_KEY: Option<&str> = option_env!("YEVEDIA_DEFAULT_SERPER_KEY");

/// Settings for one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub base_url: String,
}

impl ProviderConfig {
    pub fn new(enabled: bool, api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            enabled,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.into(),
        }
    }

    /// Enabled and carrying a key; the gate for key-requiring providers
    pub fn is_usable(&self) -> bool {
        self.enabled && self.api_key.is_some()
    }

    fn validate(&self, provider: &str) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(SearchError::ConfigError(format!(
                "{provider} base URL is required"
            )));
        }
        url::Url::parse(&self.base_url)?;
        Ok(())
    }
}

/// Process-wide search configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// LLM-oriented search API, tried first
    pub tavily: ProviderConfig,
    /// Commercial Google search API
    pub serper: ProviderConfig,
    /// Free instant-answer API, terminal fallback; key ignored
    pub duckduckgo: ProviderConfig,
    /// Upper bound for one provider attempt
    pub timeout: Duration,
    /// Results requested from providers that accept a count
    pub max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tavily: ProviderConfig::new(false, None, TAVILY_BASE_URL),
            serper: ProviderConfig::new(
                true,
                DEFAULT_SERPER_API_KEY.map(str::to_string),
                SERPER_BASE_URL,
            ),
            duckduckgo: ProviderConfig::new(true, None, DUCKDUCKGO_BASE_URL),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchConfig {
    /// Build the configuration from environment variables over the defaults.
    ///
    /// Tavily stays disabled whether or not `TAVILY_API_KEY` is set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(key) = env::var(TAVILY_API_KEY_ENV) {
            config.tavily = ProviderConfig::new(false, Some(key), TAVILY_BASE_URL);
        }
        if let Ok(key) = env::var(SERPER_API_KEY_ENV) {
            config.serper = ProviderConfig::new(true, Some(key), SERPER_BASE_URL);
        }
        if let Ok(raw) = env::var(TIMEOUT_ENV) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                SearchError::ConfigError(format!(
                    "{TIMEOUT_ENV} must be a number of milliseconds, got '{raw}'"
                ))
            })?;
            config.timeout = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_tavily_enabled(mut self, enabled: bool) -> Self {
        self.tavily.enabled = enabled;
        self
    }

    pub fn with_tavily(mut self, tavily: ProviderConfig) -> Self {
        self.tavily = tavily;
        self
    }

    pub fn with_serper(mut self, serper: ProviderConfig) -> Self {
        self.serper = serper;
        self
    }

    pub fn with_duckduckgo(mut self, duckduckgo: ProviderConfig) -> Self {
        self.duckduckgo = duckduckgo;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check base URLs and limits
    pub fn validate(&self) -> Result<()> {
        self.tavily.validate("Tavily")?;
        self.serper.validate("Serper")?;
        self.duckduckgo.validate("DuckDuckGo")?;

        if self.timeout.is_zero() {
            return Err(SearchError::ConfigError(
                "Search timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_results == 0 {
            return Err(SearchError::ConfigError(
                "max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var(SERPER_API_KEY_ENV);
        env::remove_var(TAVILY_API_KEY_ENV);
        env::remove_var(TIMEOUT_ENV);
    }

    #[test]
    fn test_blank_key_counts_as_absent() {
        let config = ProviderConfig::new(true, Some("   ".to_string()), SERPER_BASE_URL);
        assert_eq!(config.api_key, None);
        assert!(!config.is_usable());
    }

    #[test]
    fn test_disabled_provider_is_not_usable() {
        let config = ProviderConfig::new(false, Some("key".to_string()), TAVILY_BASE_URL);
        assert!(!config.is_usable());
    }

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert!(!config.tavily.enabled);
        assert!(config.serper.enabled);
        assert!(config.duckduckgo.enabled);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_keeps_tavily_disabled() {
        clear_env();
        env::set_var(TAVILY_API_KEY_ENV, "tvly-test");
        env::set_var(SERPER_API_KEY_ENV, "serper-test");

        let config = SearchConfig::from_env().unwrap();
        assert_eq!(config.tavily.api_key.as_deref(), Some("tvly-test"));
        assert!(!config.tavily.is_usable());
        assert!(config.serper.is_usable());
        assert_eq!(config.serper.api_key.as_deref(), Some("serper-test"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_timeout() {
        clear_env();
        env::set_var(TIMEOUT_ENV, "2500");
        let config = SearchConfig::from_env().unwrap();
        assert_eq!(config.timeout, Duration::from_millis(2500));

        env::set_var(TIMEOUT_ENV, "soon");
        match SearchConfig::from_env() {
            Err(SearchError::ConfigError(msg)) => assert!(msg.contains(TIMEOUT_ENV)),
            other => panic!("Expected ConfigError, got {other:?}"),
        }

        env::set_var(TIMEOUT_ENV, "0");
        assert!(SearchConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = SearchConfig::default()
            .with_duckduckgo(ProviderConfig::new(true, None, ""));
        assert!(matches!(config.validate(), Err(SearchError::ConfigError(_))));

        let config = SearchConfig::default()
            .with_duckduckgo(ProviderConfig::new(true, None, "not a url"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_tavily_enabled() {
        let config = SearchConfig::default()
            .with_tavily(ProviderConfig::new(false, Some("tvly-x".to_string()), TAVILY_BASE_URL))
            .with_tavily_enabled(true);
        assert!(config.tavily.is_usable());
    }
}
