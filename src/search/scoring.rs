//! Term-overlap scoring and top-K selection

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::processor::Chunk;

/// A chunk paired with its score for one query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub score: f64,
}

/// Lowercase, then split on anything that is not alphanumeric
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Sum of each query token's occurrence count in `text`, divided by the
/// number of query tokens. Zero when the query has no tokens.
pub fn score_overlap(query: &str, text: &str) -> f64 {
    let query_tokens = tokenize(query);
    score_tokens(&query_tokens, text)
}

fn score_tokens(query_tokens: &[String], text: &str) -> f64 {
    if query_tokens.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_default() += 1;
    }

    let hits: usize = query_tokens
        .iter()
        .map(|token| counts.get(token).copied().unwrap_or(0))
        .sum();
    hits as f64 / query_tokens.len() as f64
}

/// Rank `chunks` against `query` and keep the best `limit`
///
/// Ordering is by descending score; equal scores keep their index order.
/// Fewer than `limit` chunks means all of them are returned.
pub fn select_top<'a>(query: &str, chunks: &'a [Chunk], limit: usize) -> Vec<ScoredChunk<'a>> {
    let query_tokens = tokenize(query);
    let mut scored: Vec<ScoredChunk<'a>> = chunks
        .iter()
        .map(|chunk| ScoredChunk {
            chunk,
            score: score_tokens(&query_tokens, &chunk.text),
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    scored
}
