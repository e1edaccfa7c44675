//! # Lexical Search Module
//!
//! Retrieval and grounded answering over the in-memory chunk index. It forms
//! the "retrieval" and "generation" halves of the benchmark's RAG step.
//!
//! ## Key Components
//!
//! - `tokenize` / `score_overlap`: Lowercase alphanumeric term overlap
//! - `select_top`: Stable top-K ranking of chunks for a question
//! - `prepare_rag_context`: Numbered, source-tagged context block
//! - `generate_answer_with_rag`: Relevance-gated completion call
//! - `extract_citations`: Maps `[n]` markers back to source URLs
//!
//! ## Search Process
//!
//! 1. Score every chunk by query-term occurrences, normalized by query length
//! 2. Keep the top K, highest first, ties in index order
//! 3. Skip the model entirely when the best score is under the relevance gate
//! 4. Otherwise ask the model to answer only from the numbered sources
//! 5. Read citations back out of the answer text

mod citations;
mod rag;
mod scoring;

pub use citations::{Citation, extract_citations};
pub use rag::{
    GroundedAnswer, NOT_FOUND, RagContext, SYSTEM_PROMPT, generate_answer_with_rag,
    is_answerable, prepare_rag_context,
};
pub use scoring::{ScoredChunk, score_overlap, select_top, tokenize};

/// Options for retrieval
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Number of chunks handed to the answer step
    pub limit: usize,

    /// Best-chunk score below which no completion call is made
    pub relevance_threshold: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 3,
            relevance_threshold: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_options_default() {
        let options = SearchOptions::default();

        assert_eq!(options.limit, 3);
        assert_eq!(options.relevance_threshold, 0.2);
    }
}
