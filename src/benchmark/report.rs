//! Report types for a benchmark run

use serde::{Deserialize, Serialize};

use crate::benchmark::metrics::{completeness_score, rate, round2};
use crate::model::ModelError;
use crate::search::{Citation, GroundedAnswer};

/// Answer given when the crawl produced no pages
pub const CRAWL_FAILED_ANSWER: &str = "Could not crawl website";

/// Answer given to questions a cancelled run never finished
pub const CANCELLED_ANSWER: &str = "Cancelled before completion";

/// Outcome of one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Answered,
    NotFound,
}

/// Per-question metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetrics {
    pub answerable: bool,
    pub citation_ok: bool,
    /// Always false: there is no independent fact-check pass
    pub hallucination: bool,
    /// Share of the question's distinct tokens found in the answer, 2 decimals
    pub completeness: f64,
    /// Unrounded completeness, averaged into the overall score
    #[serde(skip)]
    pub raw_completeness: f64,
}

/// Result for one input question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub query: String,
    pub answer: String,
    pub status: QueryStatus,
    pub citations: Vec<Citation>,
    pub metrics: QueryMetrics,
}

impl QueryResult {
    /// Result built from the answer step
    pub fn from_answer(query: &str, answer: GroundedAnswer) -> Self {
        let raw_completeness = completeness_score(query, &answer.answer);
        let status = if answer.answerable {
            QueryStatus::Answered
        } else {
            QueryStatus::NotFound
        };
        Self {
            query: query.to_string(),
            metrics: QueryMetrics {
                answerable: answer.answerable,
                citation_ok: !answer.citations.is_empty(),
                hallucination: false,
                completeness: round2(raw_completeness),
                raw_completeness,
            },
            answer: answer.answer,
            status,
            citations: answer.citations,
        }
    }

    /// A not-found result carrying `answer` as its explanation, all metrics zero
    pub fn not_found(query: &str, answer: impl Into<String>) -> Self {
        Self {
            query: query.to_string(),
            answer: answer.into(),
            status: QueryStatus::NotFound,
            citations: Vec::new(),
            metrics: QueryMetrics {
                answerable: false,
                citation_ok: false,
                hallucination: false,
                completeness: 0.0,
                raw_completeness: 0.0,
            },
        }
    }

    /// Degraded result for a failed completion call
    pub fn failed(query: &str, err: &ModelError) -> Self {
        Self::not_found(query, format!("Error: {err}"))
    }

    /// Terminal marker for a question a cancelled run did not finish
    pub fn cancelled(query: &str) -> Self {
        Self::not_found(query, CANCELLED_ANSWER)
    }
}

/// Aggregate scores, each a mean over all questions rounded to 2 decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScores {
    pub answerability_rate: f64,
    pub citation_coverage: f64,
    pub hallucination_rate: f64,
    pub completeness: f64,
}

impl OverallScores {
    /// All-zero scores
    pub fn zero() -> Self {
        Self {
            answerability_rate: 0.0,
            citation_coverage: 0.0,
            hallucination_rate: 0.0,
            completeness: 0.0,
        }
    }

    /// Means over `results`
    pub fn from_results(results: &[QueryResult]) -> Self {
        let total = results.len();
        let count = |pred: fn(&QueryResult) -> bool| results.iter().filter(|r| pred(r)).count();
        let completeness_sum: f64 = results.iter().map(|r| r.metrics.raw_completeness).sum();

        Self {
            answerability_rate: rate(count(|r| r.status == QueryStatus::Answered), total),
            citation_coverage: rate(count(|r| r.metrics.citation_ok), total),
            hallucination_rate: rate(count(|r| r.metrics.hallucination), total),
            completeness: if total == 0 {
                0.0
            } else {
                round2(completeness_sum / total as f64)
            },
        }
    }
}

/// The single output artifact of a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkReport {
    pub site_url: String,
    pub crawled_pages: usize,
    pub indexed_chunks: usize,
    pub queries_run: usize,
    pub overall_scores: OverallScores,
    pub query_results: Vec<QueryResult>,
    pub missing_topics: Vec<String>,
    /// True when the run was cut short; unfinished questions carry
    /// [`CANCELLED_ANSWER`]
    #[serde(default)]
    pub cancelled: bool,
}

impl BenchmarkReport {
    /// Assemble a report from per-question results, in input order
    pub fn assemble(
        site_url: &str,
        crawled_pages: usize,
        indexed_chunks: usize,
        query_results: Vec<QueryResult>,
        cancelled: bool,
    ) -> Self {
        let missing_topics = query_results
            .iter()
            .filter(|r| r.status == QueryStatus::NotFound)
            .map(|r| r.query.clone())
            .collect();

        Self {
            site_url: site_url.to_string(),
            crawled_pages,
            indexed_chunks,
            queries_run: query_results.len(),
            overall_scores: OverallScores::from_results(&query_results),
            query_results,
            missing_topics,
            cancelled,
        }
    }

    /// The report for a crawl that yielded no pages
    pub fn crawl_failed(site_url: &str, questions: &[String]) -> Self {
        let results = questions
            .iter()
            .map(|q| QueryResult::not_found(q, CRAWL_FAILED_ANSWER))
            .collect();
        let report = Self::assemble(site_url, 0, 0, results, false);
        debug_assert_eq!(report.overall_scores, OverallScores::zero());
        report
    }

    /// Number of answered questions
    pub fn answered(&self) -> usize {
        self.query_results
            .iter()
            .filter(|r| r.status == QueryStatus::Answered)
            .count()
    }
}
