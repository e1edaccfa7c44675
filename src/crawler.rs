//! # Website Crawler Module
//!
//! This module gathers the raw material for a benchmark run: a bounded,
//! same-host, breadth-first crawl starting from a seed URL. Every page that
//! fetches successfully is flattened to normalized plain text.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: Page and link bounds, fetch timeout, priority paths
//! - `Fetcher`: The network seam, implemented by `HttpFetcher` over reqwest
//! - `CrawledPage`: A fetched page's URL, title and normalized text
//! - `crawl_website`: The breadth-first crawl loop
//!
//! ## Behavior
//!
//! - The crawl never leaves the seed's host
//! - Well-known business paths (`/contact`, `/pricing`, `/faq`, ...) can be
//!   queued ahead of organic link discovery
//! - A URL is attempted at most once per crawl, failures are skipped
//!   without retry

mod config;
mod content_extraction;
mod crawl;
mod error;
mod fetch;
mod frontier;

pub use config::{CrawlerConfig, CrawlerConfigBuilder, DEFAULT_PRIORITY_PATHS};
pub use content_extraction::{extract_links, extract_text_and_title, normalize_whitespace};
pub use crawl::{crawl_website, parse_seed_url};
pub use error::{CrawlError, FetchError};
pub use fetch::{FetchResponse, Fetcher, HttpFetcher};
pub use frontier::CrawlState;

use serde::{Deserialize, Serialize};

/// A successfully fetched page, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawledPage {
    /// URL the page was requested at, fragment stripped
    pub url: String,

    /// Document title, empty when the page has none
    pub title: String,

    /// Normalized plain text (single spaces, trimmed)
    pub text: String,
}
