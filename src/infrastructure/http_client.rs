//! HTTP client for paginated form endpoints
//!
//! Sends one form-encoded POST per page and returns the body as text.
//! Failed pages are not retried here; the caller decides what a failure means.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::domain::{HarvestError, HarvestResult, PageRequest, PageSource};
use crate::infrastructure::config::HarvestConfig;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Configuration for the form page fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub target_url: String,
    /// Sent verbatim as the `Cookie` header
    pub credential: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl FetcherConfig {
    /// Create FetcherConfig from HarvestConfig
    pub fn from_harvest_config(config: &HarvestConfig) -> Self {
        Self {
            target_url: config.target_url.clone(),
            credential: config.credential.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.request_timeout(),
        }
    }
}

/// Form POST fetcher with fixed session headers
#[derive(Clone)]
pub struct FormPageFetcher {
    client: Client,
    config: FetcherConfig,
}

impl FormPageFetcher {
    /// Create a new fetcher; fails if the configured headers are not valid header values
    pub fn new(config: FetcherConfig) -> HarvestResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&config.credential)
                .map_err(|e| HarvestError::Config(format!("Invalid credential header: {e}")))?,
        );

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| HarvestError::Config(format!("Invalid user agent: {e}")))?;

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .gzip(true)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_harvest_config(config: &HarvestConfig) -> HarvestResult<Self> {
        Self::new(FetcherConfig::from_harvest_config(config))
    }
}

#[async_trait]
impl PageSource for FormPageFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> HarvestResult<String> {
        if request.start_row == 0 {
            return Err(HarvestError::InvalidRequest(
                "start_row is 1-based and must be positive".to_string(),
            ));
        }

        let url = &self.config.target_url;
        info!("🌐 HTTP POST {} (StartRow={})", url, request.start_row);

        let response = self
            .client
            .post(url)
            .form(&request.form_fields())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("❌ HTTP error {}: {}", status, url);
            return Err(HarvestError::request_failed(status.as_u16(), url));
        }

        let body = response.text().await?;
        debug!("Fetched {} chars from {} (StartRow={})", body.len(), url, request.start_row);
        Ok(body)
    }
}
