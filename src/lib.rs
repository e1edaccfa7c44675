//! # answerbench - Website Answerability Benchmark
//!
//! Measures how well a website can answer common customer questions when
//! used as the knowledge source for retrieval-augmented generation. A run
//! crawls the site, chunks its text into an in-memory index, retrieves the
//! best chunks for each question by lexical overlap, asks a language model
//! to answer strictly from those chunks with `[n]` citations, and scores
//! the results.
//!
//! ## Features
//!
//! - Bounded, same-host, breadth-first crawling with priority paths
//! - Overlapping word-window chunking
//! - Term-overlap retrieval with a relevance gate that skips the model
//! - Grounded answers with citations mapped back to page URLs
//! - Answerability, citation coverage and completeness scores
//! - OpenAI and Gemini completions via `rig`, rate limited
//! - Cooperative cancellation with partial reports
//!
//! ## Example
//!
//! ```rust,no_run
//! use answerbench::benchmark::{Benchmark, BenchmarkConfig};
//! use answerbench::model::ModelConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BenchmarkConfig::builder()
//!         .model(ModelConfig::builder().api_key("your-api-key").build())
//!         .build();
//!
//!     let benchmark = Benchmark::from_config(config)?;
//!     let report = benchmark
//!         .run("https://example.com", Some(vec!["Do you ship abroad?".to_string()]))
//!         .await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

mod error;
pub mod cancel;
pub mod model;

// Pipeline stages
pub mod benchmark;
pub mod crawler;
pub mod processor;
pub mod search;

pub use error::{Error, Result};

/// Re-export of the types most callers need
pub mod prelude {
    pub use crate::benchmark::{Benchmark, BenchmarkConfig, BenchmarkReport};
    pub use crate::cancel::CancelToken;
    pub use crate::error::Error;
    pub use crate::error::Result;
}
