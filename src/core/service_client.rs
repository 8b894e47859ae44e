// src/core/service_client.rs
//! Shared HTTP client for the listing sources - JSON over GET

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use crate::app_log;

const USER_AGENT: &str = concat!("oppgenie/", env!("CARGO_PKG_VERSION"));

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create a client rooted at `base_url` with one request timeout for every call
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        Self::build(base_url, timeout_seconds, HeaderMap::new())
    }

    /// Same as [`new`](Self::new) but with an `Accept` header and an optional bearer token
    pub fn with_headers(
        base_url: &str,
        timeout_seconds: u64,
        accept: &str,
        bearer: Option<&str>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(accept).context("Invalid Accept header")?,
        );
        if let Some(token) = bearer {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("Invalid bearer token")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Self::build(base_url, timeout_seconds, headers)
    }

    fn build(base_url: &str, timeout_seconds: u64, headers: HeaderMap) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Generic GET request with query parameters
    pub async fn get_json<R>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = self.url(endpoint);
        app_log!(trace, "GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<R>()
                .await
                .with_context(|| format!("Failed to parse JSON response from {}", url))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ServiceClient::new("https://api.github.com/", 5).unwrap();
        assert_eq!(
            client.url("/search/repositories"),
            "https://api.github.com/search/repositories"
        );
    }

    #[test]
    fn test_rejects_unprintable_token() {
        let result = ServiceClient::with_headers(
            "https://api.github.com",
            5,
            "application/json",
            Some("bad\ntoken"),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let client = ServiceClient::new("http://127.0.0.1:9", 2).unwrap();
        let result: Result<serde_json::Value> = client.get_json("/anything", &[]).await;
        assert!(result.is_err());
    }
}
