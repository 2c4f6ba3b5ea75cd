//! HTTP utilities for calling the search APIs

use crate::error::{Result, SearchError};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("yevedia-search/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper with search-specific functionality
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// Make a GET request and return the response body as text
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| self.transport_error(e))?;
        self.handle_response_text(response).await
    }

    /// POST a JSON body with extra headers and return the response body as text
    pub async fn post_json_text<B>(
        &self,
        url: &str,
        body: &B,
        headers: HashMap<String, String>,
    ) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.client.post(url).json(body);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        self.handle_response_text(response).await
    }

    /// Handle HTTP response and return as text
    async fn handle_response_text(&self, response: Response) -> Result<String> {
        let status = response.status();

        if status.is_success() {
            response.text().await.map_err(|e| self.transport_error(e))
        } else {
            let status_code = status.as_u16();
            let response_body = response.text().await.ok();

            Err(SearchError::HttpError {
                message: format!("Request failed with status: {status}"),
                status_code: Some(status_code),
                response_body,
            })
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> SearchError {
        if error.is_timeout() {
            SearchError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            SearchError::from(error)
        }
    }
}

/// Parse a response body as JSON, reporting failures as `ParseError`
pub fn parse_json<T>(body: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(SearchError::from)
}

/// Field deserializer that reads an explicit JSON `null` as the default value
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Build a URL with query parameters, keeping their order
pub fn build_url(base_url: &str, params: &[(&str, &str)]) -> Result<String> {
    let mut url = Url::parse(base_url)?;

    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }

    Ok(url.to_string())
}

/// Last non-empty path segment of a URL, e.g. "Rust_(programming_language)"
pub fn last_path_segment(url: &str) -> Option<String> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
