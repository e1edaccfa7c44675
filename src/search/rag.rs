//! Grounded answer generation over retrieved chunks

use tracing::{debug, info, instrument};

use crate::model::{CompletionClient, ModelError};
use crate::search::citations::{Citation, extract_citations};
use crate::search::scoring::ScoredChunk;

/// Marker the model is told to reply with when the sources do not cover a question
pub const NOT_FOUND: &str = "NOT FOUND";

/// System instruction for every grounded completion
pub const SYSTEM_PROMPT: &str = "You answer questions using only the provided sources. \
If the answer is not in the sources, reply with \"NOT FOUND\". \
Cite sources using [n] after sentences.";

/// A numbered context block and the source URL behind each number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagContext {
    /// `[n] <url>\n<text>` entries separated by blank lines
    pub text: String,

    /// `sources[n - 1]` is the URL of entry `[n]`
    pub sources: Vec<String>,
}

/// Answer text, its citations, and whether it counts as answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundedAnswer {
    pub answer: String,
    pub citations: Vec<Citation>,
    pub answerable: bool,
}

impl GroundedAnswer {
    /// The gated result: no model call was made
    pub fn not_found() -> Self {
        Self {
            answer: NOT_FOUND.to_string(),
            citations: Vec::new(),
            answerable: false,
        }
    }
}

/// Whether an answer is a real answer rather than the not-found marker
pub fn is_answerable(answer: &str) -> bool {
    !answer.to_uppercase().contains(NOT_FOUND)
}

/// Build the numbered context block, one entry per chunk, 1-indexed
pub fn prepare_rag_context(chunks: &[ScoredChunk<'_>]) -> RagContext {
    let mut blocks = Vec::with_capacity(chunks.len());
    let mut sources = Vec::with_capacity(chunks.len());
    for (i, scored) in chunks.iter().enumerate() {
        let url = &scored.chunk.source_url;
        blocks.push(format!("[{}] {}\n{}", i + 1, url, scored.chunk.text));
        sources.push(url.clone());
    }
    RagContext {
        text: blocks.join("\n\n"),
        sources,
    }
}

/// Answer `query` from `chunks` when they are relevant enough
///
/// If there are no chunks, or the best score is below
/// `relevance_threshold`, returns [`GroundedAnswer::not_found`] without
/// touching the model. Otherwise the model is asked to answer strictly from
/// the numbered sources and cite them as `[n]`.
///
/// # Errors
///
/// Completion failures are returned as-is; there is no retry.
#[instrument(skip(model, chunks), fields(chunks = chunks.len()))]
pub async fn generate_answer_with_rag<M: CompletionClient>(
    model: &M,
    query: &str,
    chunks: &[ScoredChunk<'_>],
    relevance_threshold: f64,
) -> Result<GroundedAnswer, ModelError> {
    let best = chunks
        .iter()
        .map(|scored| scored.score)
        .fold(f64::NEG_INFINITY, f64::max);
    if chunks.is_empty() || best < relevance_threshold {
        debug!(best_score = best, "Below relevance threshold, skipping completion");
        return Ok(GroundedAnswer::not_found());
    }

    let context = prepare_rag_context(chunks);
    let prompt = format!("Question: {}\n\nSources:\n{}", query, context.text);
    info!(context_len = context.text.len(), "Requesting grounded answer");

    let answer = model.complete(SYSTEM_PROMPT, &prompt).await?;
    let answerable = is_answerable(&answer);
    let citations = extract_citations(&answer, &context.sources);
    debug!(answerable, citations = citations.len(), "Answer received");

    Ok(GroundedAnswer {
        answer,
        citations,
        answerable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MockCompletionModel;
    use crate::processor::Chunk;

    fn chunks() -> Vec<Chunk> {
        vec![
            Chunk {
                source_url: "https://acme.example.com/services".to_string(),
                text: "We offer consulting and design services.".to_string(),
            },
            Chunk {
                source_url: "https://acme.example.com/pricing".to_string(),
                text: "Plans start at $500/month.".to_string(),
            },
        ]
    }

    fn scored<'a>(chunks: &'a [Chunk], scores: &[f64]) -> Vec<ScoredChunk<'a>> {
        chunks
            .iter()
            .zip(scores)
            .map(|(chunk, score)| ScoredChunk {
                chunk,
                score: *score,
            })
            .collect()
    }

    #[test]
    fn test_prepare_rag_context() {
        let chunks = chunks();
        let context = prepare_rag_context(&scored(&chunks, &[0.4, 0.3]));

        assert_eq!(
            context.text,
            "[1] https://acme.example.com/services\nWe offer consulting and design services.\n\n\
             [2] https://acme.example.com/pricing\nPlans start at $500/month."
        );
        assert_eq!(
            context.sources,
            vec![
                "https://acme.example.com/services".to_string(),
                "https://acme.example.com/pricing".to_string(),
            ]
        );
    }

    #[test]
    fn test_is_answerable_is_case_insensitive() {
        assert!(is_answerable("We offer consulting [1]."));
        assert!(!is_answerable("NOT FOUND"));
        assert!(!is_answerable("Sorry, not found in the sources."));
    }

    #[tokio::test]
    async fn test_empty_chunks_skip_model() {
        let model = MockCompletionModel::with_text("should not be used");

        let answer = generate_answer_with_rag(&model, "What services?", &[], 0.2)
            .await
            .unwrap();

        assert_eq!(answer, GroundedAnswer::not_found());
        assert_eq!(model.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_low_score_skips_model() {
        let model = MockCompletionModel::with_text("should not be used");
        let chunks = chunks();

        let answer = generate_answer_with_rag(&model, "q", &scored(&chunks, &[0.19, 0.1]), 0.2)
            .await
            .unwrap();

        assert_eq!(answer.answer, "NOT FOUND");
        assert!(answer.citations.is_empty());
        assert!(!answer.answerable);
        assert_eq!(model.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_grounded_answer_with_citations() {
        let model =
            MockCompletionModel::with_text("We offer consulting and design services [1] [7].");
        let chunks = chunks();

        let answer = generate_answer_with_rag(
            &model,
            "What services do you offer?",
            &scored(&chunks, &[0.4, 0.2]),
            0.2,
        )
        .await
        .unwrap();

        assert!(answer.answerable);
        assert_eq!(answer.citations.len(), 1);
        assert_eq!(answer.citations[0].url, "https://acme.example.com/services");

        let calls = model.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].preamble, SYSTEM_PROMPT);
        assert!(calls[0].prompt.starts_with("Question: What services do you offer?\n\nSources:\n[1] "));
        assert!(calls[0].prompt.contains("[2] https://acme.example.com/pricing"));
    }

    #[tokio::test]
    async fn test_model_not_found_reply() {
        let model = MockCompletionModel::with_text("Not found.");
        let chunks = chunks();

        let answer = generate_answer_with_rag(&model, "Refunds?", &scored(&chunks, &[1.0]), 0.2)
            .await
            .unwrap();

        assert!(!answer.answerable);
        assert_eq!(model.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_model_error_propagates() {
        let model = MockCompletionModel::new();
        model.set_error("service unavailable").await;
        let chunks = chunks();

        let result = generate_answer_with_rag(&model, "q", &scored(&chunks, &[1.0]), 0.2).await;

        assert!(matches!(result, Err(ModelError::Service(_))));
    }
}
