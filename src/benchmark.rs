//! # Benchmark Module
//!
//! Runs the whole answerability pipeline for one website: crawl once, build
//! the chunk index once, then retrieve and answer every question against
//! that shared index and score the results.
//!
//! ## Key Components
//!
//! - `Benchmark`: Owns the configuration, the fetcher and the completion client
//! - `BenchmarkConfig`: All run settings, passed in explicitly
//! - `BenchmarkReport`: The single output artifact
//! - `BenchmarkEvent`: Optional progress notifications
//!
//! ## Example
//!
//! ```no_run
//! use answerbench::benchmark::{Benchmark, BenchmarkConfig};
//! use answerbench::model::ModelConfig;
//!
//! # async fn example() -> answerbench::Result<()> {
//! let config = BenchmarkConfig::builder()
//!     .model(ModelConfig::builder().api_key("sk-...").build())
//!     .build();
//! let benchmark = Benchmark::from_config(config)?;
//! let report = benchmark.run("https://example.com", None).await?;
//! println!("{:.0}% answerable", report.overall_scores.answerability_rate * 100.0);
//! # Ok(())
//! # }
//! ```

mod config;
mod metrics;
mod questions;
mod report;

pub use config::{BenchmarkConfig, BenchmarkConfigBuilder};
pub use metrics::{completeness_score, rate, round2};
pub use questions::{DEFAULT_QUESTIONS, default_questions, load_questions, resolve_questions};
pub use report::{
    BenchmarkReport, CANCELLED_ANSWER, CRAWL_FAILED_ANSWER, OverallScores, QueryMetrics,
    QueryResult, QueryStatus,
};

use futures::future::join_all;
use tokio::sync::{Semaphore, mpsc};
use tracing::{info, instrument, warn};

use crate::cancel::CancelToken;
use crate::crawler::{Fetcher, HttpFetcher, crawl_website};
use crate::error::Result;
use crate::model::{CompletionClient, ModelError, ProviderModel};
use crate::processor::{Chunk, build_index};
use crate::search::{generate_answer_with_rag, select_top};

/// Progress notification sent while a run is in flight
#[derive(Debug, Clone, PartialEq)]
pub enum BenchmarkEvent {
    /// The crawl ended and the index is built
    CrawlFinished { pages: usize, chunks: usize },

    /// One question reached a terminal result
    QueryFinished {
        index: usize,
        query: String,
        status: QueryStatus,
    },
}

/// The answerability benchmark
pub struct Benchmark<F = HttpFetcher, M = ProviderModel> {
    config: BenchmarkConfig,
    fetcher: F,
    model: M,
    events: Option<mpsc::UnboundedSender<BenchmarkEvent>>,
}

impl Benchmark<HttpFetcher, ProviderModel> {
    /// Build a benchmark with the HTTP fetcher and the configured provider
    ///
    /// # Errors
    ///
    /// `Error::Config` for invalid settings or a missing API key. Nothing
    /// has been crawled or asked when this fails.
    pub fn from_config(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;
        let model = ProviderModel::from_config(&config.model)?;
        let fetcher = HttpFetcher::new(&config.crawler)?;
        Self::new(config, fetcher, model)
    }
}

impl<F: Fetcher, M: CompletionClient> Benchmark<F, M> {
    /// Build a benchmark from explicit collaborators
    pub fn new(config: BenchmarkConfig, fetcher: F, model: M) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fetcher,
            model,
            events: None,
        })
    }

    /// Send progress events to `events`
    pub fn with_events(mut self, events: mpsc::UnboundedSender<BenchmarkEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// The run configuration
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Run the benchmark to completion
    ///
    /// `questions` of `None` or an empty list runs [`DEFAULT_QUESTIONS`].
    pub async fn run(&self, site_url: &str, questions: Option<Vec<String>>) -> Result<BenchmarkReport> {
        self.run_with_cancel(site_url, questions, &CancelToken::new())
            .await
    }

    /// Run the benchmark until it completes or `cancel` fires
    ///
    /// A cancelled run still returns a full report: finished questions keep
    /// their results and the rest are marked [`CANCELLED_ANSWER`].
    ///
    /// # Errors
    ///
    /// `Error::InvalidRequest` when `site_url` is not an absolute http(s)
    /// URL. Completion failures never fail the run; they degrade the
    /// affected question only.
    #[instrument(skip(self, questions, cancel))]
    pub async fn run_with_cancel(
        &self,
        site_url: &str,
        questions: Option<Vec<String>>,
        cancel: &CancelToken,
    ) -> Result<BenchmarkReport> {
        let questions = resolve_questions(questions);
        info!("Starting benchmark with {} questions", questions.len());

        let pages = crawl_website(&self.fetcher, site_url, &self.config.crawler, cancel).await?;
        let crawl_cancelled = cancel.is_cancelled();

        if pages.is_empty() && !crawl_cancelled {
            warn!("No pages crawled, skipping retrieval");
            self.emit(BenchmarkEvent::CrawlFinished { pages: 0, chunks: 0 });
            let report = BenchmarkReport::crawl_failed(site_url, &questions);
            for (index, result) in report.query_results.iter().enumerate() {
                self.emit(BenchmarkEvent::QueryFinished {
                    index,
                    query: result.query.clone(),
                    status: result.status,
                });
            }
            return Ok(report);
        }

        let chunks = build_index(&pages, &self.config.chunk_options)?;
        info!("Indexed {} chunks from {} pages", chunks.len(), pages.len());
        self.emit(BenchmarkEvent::CrawlFinished {
            pages: pages.len(),
            chunks: chunks.len(),
        });

        let semaphore = Semaphore::new(self.config.query_concurrency);
        let outcomes = join_all(
            questions
                .iter()
                .enumerate()
                .map(|(index, query)| self.answer_question(index, query, &chunks, &semaphore, cancel)),
        )
        .await;

        let query_cancelled = outcomes.iter().any(|(_, cancelled)| *cancelled);
        let results = outcomes.into_iter().map(|(result, _)| result).collect();
        let report = BenchmarkReport::assemble(
            site_url,
            pages.len(),
            chunks.len(),
            results,
            crawl_cancelled || query_cancelled,
        );

        info!(
            answered = report.answered(),
            queries = report.queries_run,
            cancelled = report.cancelled,
            "Benchmark finished"
        );
        Ok(report)
    }

    /// Retrieve and answer one question. The flag is true when the result
    /// is a cancellation marker.
    #[instrument(skip(self, chunks, semaphore, cancel))]
    async fn answer_question(
        &self,
        index: usize,
        query: &str,
        chunks: &[Chunk],
        semaphore: &Semaphore,
        cancel: &CancelToken,
    ) -> (QueryResult, bool) {
        let (result, cancelled) = tokio::select! {
            biased;
            _ = cancel.cancelled() => (QueryResult::cancelled(query), true),
            result = self.answer_with_permit(query, chunks, semaphore) => (result, false),
        };

        self.emit(BenchmarkEvent::QueryFinished {
            index,
            query: query.to_string(),
            status: result.status,
        });
        (result, cancelled)
    }

    async fn answer_with_permit(&self, query: &str, chunks: &[Chunk], semaphore: &Semaphore) -> QueryResult {
        // The semaphore lives for the whole run and is never closed
        let _permit = semaphore.acquire().await.ok();

        let top = select_top(query, chunks, self.config.search.limit);
        let timeout = self.config.completion_timeout;
        let answer = tokio::time::timeout(
            timeout,
            generate_answer_with_rag(
                &self.model,
                query,
                &top,
                self.config.search.relevance_threshold,
            ),
        )
        .await
        .unwrap_or(Err(ModelError::Timeout(timeout)));

        match answer {
            Ok(answer) => QueryResult::from_answer(query, answer),
            Err(e) => {
                warn!("Answer failed for {:?}: {}", query, e);
                QueryResult::failed(query, &e)
            }
        }
    }

    fn emit(&self, event: BenchmarkEvent) {
        if let Some(events) = &self.events {
            // A dropped receiver only means nobody is watching
            let _ = events.send(event);
        }
    }
}
