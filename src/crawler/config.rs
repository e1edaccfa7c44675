//! # Crawler Configuration Module
//!
//! Bounds and politeness settings for the benchmark crawler. Uses a builder
//! for flexible configuration.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: The main configuration struct with crawler parameters
//! - `CrawlerConfigBuilder`: Builder pattern implementation for easier configuration

use std::time::Duration;

/// Paths that usually carry the business facts the default questions ask for.
pub const DEFAULT_PRIORITY_PATHS: &[&str] = &[
    "/contact",
    "/contact-us",
    "/about",
    "/about-us",
    "/pricing",
    "/prices",
    "/plans",
    "/faq",
    "/support",
    "/help",
    "/locations",
    "/hours",
    "/refund",
    "/refund-policy",
    "/terms",
    "/services",
];

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Maximum number of successfully fetched pages to keep
    pub max_pages: usize,

    /// Maximum number of links taken from a single page, in document order
    pub max_links_per_page: usize,

    /// Upper bound on a single fetch
    pub fetch_timeout: Duration,

    /// User agent to use for requests
    pub user_agent: String,

    /// Paths resolved against the seed's origin and queued before the seed
    pub priority_paths: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 15,
            max_links_per_page: 50,
            fetch_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            priority_paths: DEFAULT_PRIORITY_PATHS
                .iter()
                .map(|path| path.to_string())
                .collect(),
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the maximum number of pages to crawl
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the per-page link cap
    pub fn max_links_per_page(mut self, max_links_per_page: usize) -> Self {
        self.config.max_links_per_page = max_links_per_page;
        self
    }

    /// Set the fetch timeout
    pub fn fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.config.fetch_timeout = fetch_timeout;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Replace the priority paths. An empty list disables priming.
    pub fn priority_paths(mut self, priority_paths: Vec<String>) -> Self {
        self.config.priority_paths = priority_paths;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlerConfig::default();

        assert_eq!(config.max_pages, 15);
        assert_eq!(config.max_links_per_page, 50);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.priority_paths.len(), DEFAULT_PRIORITY_PATHS.len());
        assert_eq!(config.priority_paths[0], "/contact");
    }

    #[test]
    fn test_builder_overrides() {
        let config = CrawlerConfig::builder()
            .max_pages(3)
            .max_links_per_page(7)
            .fetch_timeout(Duration::from_secs(2))
            .user_agent("answerbench-test")
            .priority_paths(Vec::new())
            .build();

        assert_eq!(config.max_pages, 3);
        assert_eq!(config.max_links_per_page, 7);
        assert_eq!(config.fetch_timeout, Duration::from_secs(2));
        assert_eq!(config.user_agent, "answerbench-test");
        assert!(config.priority_paths.is_empty());
    }
}
