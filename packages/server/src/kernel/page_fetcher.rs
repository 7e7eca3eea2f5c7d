//! Product page fetcher - reqwest with browser-like headers, a fixed
//! timeout, and a response size ceiling.
//!
//! No proxying, retries or anti-bot handling: a blocked request simply
//! surfaces as a timeout, status, or missing-title failure.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

use super::BasePageFetcher;
use crate::common::{ListingError, UpstreamError};

pub const DEFAULT_BASE_URL: &str = "https://www.amazon.com/dp/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_BYTES: usize = 5_000_000;

/// Settings for [`AmazonPageFetcher`].
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Product page prefix; the ASIN is appended verbatim
    pub base_url: String,
    pub user_agent: String,
    /// Applied to both connect and whole-request time
    pub timeout: Duration,
    pub max_bytes: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

pub struct AmazonPageFetcher {
    client: reqwest::Client,
    config: ScraperConfig,
}

impl AmazonPageFetcher {
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.5"),
        );
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(
            header::UPGRADE_INSECURE_REQUESTS,
            HeaderValue::from_static("1"),
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn product_url(&self, asin: &str) -> String {
        format!("{}{}", self.config.base_url, asin)
    }

    /// Read the body, refusing to buffer more than `max_bytes`.
    async fn read_capped(&self, mut response: reqwest::Response) -> Result<String, UpstreamError> {
        let max_bytes = self.config.max_bytes;

        if let Some(length) = response.content_length() {
            if length > max_bytes as u64 {
                return Err(UpstreamError::TooLarge(max_bytes));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(classify_transport_error)? {
            if body.len() + chunk.len() > max_bytes {
                return Err(UpstreamError::TooLarge(max_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl BasePageFetcher for AmazonPageFetcher {
    async fn fetch_product_page(&self, asin: &str) -> crate::common::Result<String> {
        let url = self.product_url(asin);
        debug!(url = %url, "Fetching product page");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Product page request failed");
            classify_transport_error(e)
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ListingError::not_found(
                "Product not found. Please check the ASIN.",
            ));
        }
        if !status.is_success() {
            warn!(url = %url, status = %status, "Product page returned error status");
            return Err(UpstreamError::Status(status.as_u16()).into());
        }

        let markup = self.read_capped(response).await?;
        debug!(url = %url, bytes = markup.len(), "Fetched product page");
        Ok(markup)
    }
}

fn classify_transport_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else if e.is_connect() {
        UpstreamError::Connectivity
    } else {
        UpstreamError::Fetch(e.to_string())
    }
}
