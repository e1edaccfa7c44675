//! Error types for the crawler module

use crate::error::Error as CrateError;
use std::time::Duration;
use thiserror::Error;

/// Error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    /// HTTP client construction error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The seed is not an absolute http(s) URL with a host
    #[error("Invalid seed URL: {0}")]
    InvalidSeed(String),
}

/// Error type for a single fetch. The crawl loop skips the URL on any of these.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport level failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The fetch did not complete in time
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl From<CrawlError> for CrateError {
    fn from(err: CrawlError) -> Self {
        match err {
            CrawlError::Http(e) => CrateError::Http(e),
            CrawlError::InvalidSeed(_) | CrawlError::UrlParse(_) => {
                CrateError::InvalidRequest(err.to_string())
            }
        }
    }
}
