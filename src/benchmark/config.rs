//! # Benchmark Configuration Module
//!
//! Everything one benchmark run needs, passed in explicitly at
//! construction. Nothing below this object reads process state.
//!
//! ## Key Components
//!
//! - `BenchmarkConfig`: Crawl, chunk, retrieval, model and run settings
//! - `BenchmarkConfigBuilder`: Builder pattern implementation for easier configuration

use std::time::Duration;

use crate::crawler::CrawlerConfig;
use crate::error::{Error, Result};
use crate::model::ModelConfig;
use crate::processor::ChunkOptions;
use crate::search::SearchOptions;

/// Configuration for a benchmark run
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Crawl bounds
    pub crawler: CrawlerConfig,

    /// Chunk window sizes
    pub chunk_options: ChunkOptions,

    /// Top-K and relevance gate
    pub search: SearchOptions,

    /// Completion service settings, including the credential
    pub model: ModelConfig,

    /// Questions answered concurrently
    pub query_concurrency: usize,

    /// Upper bound on a single completion call
    pub completion_timeout: Duration,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            chunk_options: ChunkOptions::default(),
            search: SearchOptions::default(),
            model: ModelConfig::default(),
            query_concurrency: 4,
            completion_timeout: Duration::from_secs(60),
        }
    }
}

impl BenchmarkConfig {
    /// Create a new builder
    pub fn builder() -> BenchmarkConfigBuilder {
        BenchmarkConfigBuilder::new()
    }

    /// Reject settings that cannot produce a meaningful run
    pub fn validate(&self) -> Result<()> {
        self.chunk_options.validate()?;
        if self.search.limit == 0 {
            return Err(Error::Config("top_k must be greater than zero".to_string()));
        }
        if !(self.search.relevance_threshold >= 0.0) {
            return Err(Error::Config(
                "relevance_threshold must be a non-negative number".to_string(),
            ));
        }
        if self.query_concurrency == 0 {
            return Err(Error::Config(
                "query_concurrency must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for BenchmarkConfig
#[derive(Debug, Default)]
pub struct BenchmarkConfigBuilder {
    config: BenchmarkConfig,
}

impl BenchmarkConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: BenchmarkConfig::default(),
        }
    }

    /// Set the crawler configuration
    pub fn crawler(mut self, crawler: CrawlerConfig) -> Self {
        self.config.crawler = crawler;
        self
    }

    /// Set the chunk options
    pub fn chunk_options(mut self, chunk_options: ChunkOptions) -> Self {
        self.config.chunk_options = chunk_options;
        self
    }

    /// Set the number of chunks retrieved per question
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.config.search.limit = top_k;
        self
    }

    /// Set the relevance gate
    pub fn relevance_threshold(mut self, relevance_threshold: f64) -> Self {
        self.config.search.relevance_threshold = relevance_threshold;
        self
    }

    /// Set the model configuration
    pub fn model(mut self, model: ModelConfig) -> Self {
        self.config.model = model;
        self
    }

    /// Set how many questions run at once
    pub fn query_concurrency(mut self, query_concurrency: usize) -> Self {
        self.config.query_concurrency = query_concurrency;
        self
    }

    /// Set the completion timeout
    pub fn completion_timeout(mut self, completion_timeout: Duration) -> Self {
        self.config.completion_timeout = completion_timeout;
        self
    }

    /// Build the configuration
    pub fn build(self) -> BenchmarkConfig {
        self.config
    }
}
