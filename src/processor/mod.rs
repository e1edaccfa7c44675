//! Content processor module
//!
//! Turns crawled pages into the in-memory chunk index searched by the
//! retriever. Every chunk keeps the URL of the page it came from.

mod chunking;
mod config;
mod error;

pub use chunking::chunk_text;
pub use config::ChunkOptions;
pub use error::ProcessError;

use crate::crawler::CrawledPage;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A word window of one page's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// URL of the page this chunk was cut from
    pub source_url: String,

    /// The chunk's words joined by single spaces
    pub text: String,
}

/// Chunk every page, preserving page order and per-page chunk order
///
/// # Arguments
///
/// * `pages` - Crawled pages
/// * `options` - Chunking options
///
/// # Returns
///
/// The flat chunk index for one benchmark run
#[instrument(skip(pages), fields(pages = pages.len()))]
pub fn build_index(
    pages: &[CrawledPage],
    options: &ChunkOptions,
) -> Result<Vec<Chunk>, ProcessError> {
    let mut index = Vec::new();
    for page in pages {
        let chunks = chunk_text(&page.text, options)?;
        debug!("Created {} chunks from {}", chunks.len(), page.url);
        index.extend(chunks.into_iter().map(|text| Chunk {
            source_url: page.url.clone(),
            text,
        }));
    }
    Ok(index)
}
