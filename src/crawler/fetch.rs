//! Network retrieval for the crawler

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use tracing::{debug, instrument};
use url::Url;

use crate::crawler::CrawlerConfig;
use crate::crawler::error::{CrawlError, FetchError};

/// Status and body of a completed fetch. Error statuses are not errors here;
/// the crawler decides what to skip.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body decoded as text
    pub body: String,
}

impl FetchResponse {
    /// Whether the crawler should treat the response as a page
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Retrieves a URL with a bounded wait.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// Fetch `url`, failing with [`FetchError`] on transport errors or timeout
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError>;
}

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: ReqwestClient,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher honoring the config's timeout and user agent
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlError> {
        let client = ReqwestClient::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            timeout: config.fetch_timeout,
        })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(skip(self), fields(url = %url), level = "debug")]
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!(status, body_len = body.len(), "Fetched");

        Ok(FetchResponse { status, body })
    }
}

impl HttpFetcher {
    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(err)
        }
    }
}
