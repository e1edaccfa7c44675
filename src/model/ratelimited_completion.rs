use std::sync::Arc;

use governor::DefaultDirectRateLimiter;
use rig::completion::{
    self, AssistantContent, CompletionError, CompletionModel, CompletionRequest,
    CompletionResponse,
};
use tracing::{debug, debug_span, info_span, instrument, Instrument};

use super::{CompletionClient, ModelError, RateLimitResponse};

/// A `rig` completion model that waits on a shared rate limiter before
/// every request
#[derive(Clone)]
pub struct RateLimitedCompletionModel<M: CompletionModel> {
    model: M,
    limiter: Arc<DefaultDirectRateLimiter>,
    temperature: Option<f64>,
}

impl<M> RateLimitedCompletionModel<M>
where
    M: CompletionModel,
{
    pub fn new(model: M, limiter: DefaultDirectRateLimiter) -> Self {
        Self {
            model,
            limiter: Arc::new(limiter),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl<M: CompletionModel> CompletionModel for RateLimitedCompletionModel<M> {
    type Response = RateLimitResponse<M::Response>;

    async fn completion(
        &self,
        completion_request: CompletionRequest,
    ) -> Result<completion::CompletionResponse<Self::Response>, CompletionError> {
        self.limiter.until_ready().instrument(debug_span!("limiter")).await;
        let response = self
            .model
            .completion(completion_request)
            .instrument(info_span!("completion"))
            .await;
        response.map(|response| {
            let rate_limit = RateLimitResponse {
                response: response.raw_response,
            };
            let choice = response.choice;
            CompletionResponse {
                choice,
                raw_response: rate_limit,
            }
        })
    }
}

impl<M: CompletionModel> CompletionClient for RateLimitedCompletionModel<M> {
    #[instrument(skip_all, fields(prompt_len = prompt.len()))]
    async fn complete(&self, preamble: &str, prompt: &str) -> Result<String, ModelError> {
        let mut request = self
            .completion_request(prompt.to_string())
            .preamble(preamble.to_string());
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }
        let response = request.send().await?;

        let text = response
            .choice
            .iter()
            .filter_map(|content| match content {
                AssistantContent::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect::<Vec<String>>()
            .join("\n");
        let text = text.trim();
        if text.is_empty() {
            return Err(ModelError::EmptyResponse);
        }

        debug!(answer_len = text.len(), "Completion received");
        Ok(text.to_string())
    }
}
