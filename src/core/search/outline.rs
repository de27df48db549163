//! Outline `documents.search` client.

use super::response::ResponseShape;
use super::SearchBackend;
use crate::core::config::OutlineConfig;
use crate::core::error::{Result, WikiSearchError};
use crate::core::types::{SearchRequest, SearchResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Path of the search RPC, relative to the configured base URL
pub const SEARCH_PATH: &str = "/documents.search";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Outline search API
pub struct OutlineClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    timeout: Duration,
}

impl OutlineClient {
    /// Build a client from configuration
    ///
    /// Fails when the base URL or token is missing, or when the proxy
    /// URL cannot be parsed.
    pub fn new(config: &OutlineConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() || config.token.trim().is_empty() {
            return Err(WikiSearchError::ConfigError(
                "OUTLINE_BASE_URL and OUTLINE_TOKEN must be configured in environment variables"
                    .to_string(),
            ));
        }

        let timeout = if config.timeout_sec == 0 {
            DEFAULT_TIMEOUT
        } else {
            Duration::from_secs(config.timeout_sec)
        };

        let mut builder = reqwest::Client::builder().timeout(timeout);

        // Only the configured proxy is used; system proxy discovery is off
        builder = match config.proxy_url.as_deref() {
            Some(proxy_url) => {
                let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                    WikiSearchError::ConfigError(format!("Invalid proxy URL: {e}"))
                })?;
                info!("Tunneling Outline requests through configured proxy");
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let http = builder.build().map_err(|e| {
            WikiSearchError::ConfigError(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), SEARCH_PATH),
            token: config.token.clone(),
            timeout,
        })
    }

    /// Full URL the client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, err: reqwest::Error) -> WikiSearchError {
        if err.is_timeout() {
            WikiSearchError::Timeout(self.timeout.as_millis())
        } else {
            WikiSearchError::Http(err)
        }
    }
}

#[async_trait]
impl SearchBackend for OutlineClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        debug!(
            query = %request.query,
            limit = request.limit,
            offset = request.offset,
            "Searching Outline"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Outline search request rejected");
            return Err(WikiSearchError::RequestFailed(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.map_send_error(e))?;
        let parsed = ResponseShape::classify(&body).into_result()?;

        debug!(results = parsed.data.len(), "Outline search completed");
        Ok(parsed.data)
    }
}
