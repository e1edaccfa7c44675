//! # Mock Completion Model for Testing
//!
//! Provides a `MockCompletionModel` that implements [`CompletionClient`]
//! without calling any service. It records every call so tests can assert
//! how often the model was reached and what it was sent, and it can be set
//! up to answer with fixed text, fail, or stall.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::{CompletionClient, ModelError};

/// One recorded `complete` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub preamble: String,
    pub prompt: String,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

/// A mock completion model for testing purposes.
#[derive(Debug, Clone)]
pub struct MockCompletionModel {
    reply: Arc<Mutex<MockReply>>,
    delay: Arc<Mutex<Option<Duration>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockCompletionModel {
    /// Creates a new mock model that answers with an empty string.
    pub fn new() -> Self {
        Self {
            reply: Arc::new(Mutex::new(MockReply::Text(String::new()))),
            delay: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock model that answers every call with `text`.
    pub fn with_text(text: &str) -> Self {
        Self {
            reply: Arc::new(Mutex::new(MockReply::Text(text.to_string()))),
            ..Self::new()
        }
    }

    /// Sets the text returned by later calls.
    pub async fn set_text_response(&self, text: &str) {
        *self.reply.lock().await = MockReply::Text(text.to_string());
    }

    /// Makes later calls fail with a service error.
    pub async fn set_error(&self, message: &str) {
        *self.reply.lock().await = MockReply::Error(message.to_string());
    }

    /// Makes later calls wait before answering.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.lock().await = Some(delay);
    }

    /// Number of calls made so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Every call made so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }
}

impl Default for MockCompletionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionClient for MockCompletionModel {
    async fn complete(&self, preamble: &str, prompt: &str) -> Result<String, ModelError> {
        self.calls.lock().await.push(RecordedCall {
            preamble: preamble.to_string(),
            prompt: prompt.to_string(),
        });

        let delay = *self.delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.reply.lock().await.clone();
        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(message) => Err(ModelError::Service(message)),
        }
    }
}
