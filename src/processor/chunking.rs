//! # Word Window Chunking
//!
//! Splits normalized page text into fixed-size, overlapping word windows.
//!
//! Each window holds `target_chunk_size` words and starts
//! `target_chunk_size - overlap_size` words after the previous one, so
//! neighbouring chunks share `overlap_size` words. The last window may be
//! short; it is never padded, and chunking stops at the first window that
//! reaches the end of the text.

use crate::processor::ChunkOptions;
use crate::processor::error::ProcessError;
use tracing::{instrument, trace};

/// Chunk text into overlapping word windows
///
/// # Arguments
///
/// * `text` - The text to chunk; tokenized on whitespace
/// * `options` - Chunking options
///
/// # Returns
///
/// The chunks, each a single-space join of its words. Empty text yields no
/// chunks.
#[instrument(skip(text), level = "trace")]
pub fn chunk_text(text: &str, options: &ChunkOptions) -> Result<Vec<String>, ProcessError> {
    options.validate()?;

    let words: Vec<&str> = text.split_whitespace().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < words.len() {
        let end = (start + options.target_chunk_size).min(words.len());
        chunks.push(words[start..end].join(" "));
        if end == words.len() {
            break;
        }
        start += options.stride();
    }

    trace!(words = words.len(), chunks = chunks.len(), "Chunked text");
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    fn options(size: usize, overlap: usize) -> ChunkOptions {
        ChunkOptions::new(size, overlap).unwrap()
    }

    /// Drop each chunk's leading overlap and concatenate
    fn reconstruct(chunks: &[String], overlap: usize) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let skip = if i == 0 { 0 } else { overlap };
            out.extend(chunk.split(' ').skip(skip).map(String::from));
        }
        out
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(chunk_text("", &ChunkOptions::default()).unwrap().is_empty());
        assert!(chunk_text("  \n\t ", &ChunkOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = chunk_text("We offer  consulting\nservices.", &ChunkOptions::default()).unwrap();
        assert_eq!(chunks, vec!["We offer consulting services."]);
    }

    #[test]
    fn test_window_boundaries() {
        let chunks = chunk_text(&words(10), &options(4, 1)).unwrap();

        assert_eq!(
            chunks,
            vec!["w0 w1 w2 w3", "w3 w4 w5 w6", "w6 w7 w8 w9"]
        );
    }

    #[test]
    fn test_final_window_is_short_and_unpadded() {
        let chunks = chunk_text(&words(6), &options(4, 1)).unwrap();
        assert_eq!(chunks, vec!["w0 w1 w2 w3", "w3 w4 w5"]);
    }

    #[test]
    fn test_chunk_count_formula() {
        for n in 1..60 {
            for (size, overlap) in [(4, 1), (5, 2), (7, 0), (10, 3)] {
                let chunks = chunk_text(&words(n), &options(size, overlap)).unwrap();
                let expected = if n <= size {
                    1
                } else {
                    (n - overlap).div_ceil(size - overlap)
                };
                assert_eq!(chunks.len(), expected, "n={n} size={size} overlap={overlap}");
            }
        }
    }

    #[test]
    fn test_reconstruction_without_loss_or_duplication() {
        for n in [1, 5, 119, 800, 801, 1480, 1481, 3000] {
            let text = words(n);
            let chunks = chunk_text(&text, &ChunkOptions::default()).unwrap();
            let rebuilt = reconstruct(&chunks, 120);
            let original: Vec<String> = text.split(' ').map(String::from).collect();
            assert_eq!(rebuilt, original, "n={n}");
        }
    }

    #[test]
    fn test_invalid_options_rejected() {
        let bad = ChunkOptions {
            target_chunk_size: 3,
            overlap_size: 3,
        };
        assert!(chunk_text("a b c d", &bad).is_err());
    }
}
