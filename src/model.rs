//! # Completion Client Module
//!
//! The seam between the benchmark engine and the external language-model
//! completion service. The engine only ever asks for one thing: a system
//! instruction plus a user prompt in, free text out.
//!
//! ## Key Components
//!
//! - `CompletionClient`: The trait the answer synthesizer calls
//! - `ModelConfig`: Provider, model name, credential, rate limit
//! - `ProviderModel`: OpenAI or Gemini via `rig`, rate limited
//! - `RateLimitedCompletionModel`: A `governor` wrapper around any `rig` completion model
//! - `MockCompletionModel`: A call-recording stand-in for tests
//!
//! Credentials are never looked up here. `ProviderModel::from_config` fails
//! with a configuration error when the key is absent.

use std::num::NonZeroU32;

use governor::{Quota, RateLimiter};
use rig::providers::{gemini, openai};
use tracing::{info, instrument};

use crate::error::{Error, Result};

mod config;
mod error;
pub mod mock_model;
pub mod ratelimited_completion;

pub use config::{LlmProvider, ModelConfig};
pub use error::ModelError;
pub use mock_model::{MockCompletionModel, RecordedCall};
pub use ratelimited_completion::RateLimitedCompletionModel;

/// A stateless completion call. Each call is an independent request.
#[allow(async_fn_in_trait)]
pub trait CompletionClient {
    /// Complete `prompt` under the system instruction `preamble`
    async fn complete(&self, preamble: &str, prompt: &str) -> std::result::Result<String, ModelError>;
}

pub struct RateLimitResponse<T> {
    #[allow(dead_code)]
    response: T,
}

/// A configured, rate-limited provider model
#[derive(Clone)]
pub enum ProviderModel {
    OpenAi(RateLimitedCompletionModel<openai::CompletionModel>),
    Gemini(RateLimitedCompletionModel<gemini::completion::CompletionModel>),
}

impl ProviderModel {
    /// Build the provider model described by `config`
    ///
    /// # Errors
    ///
    /// `Error::Config` when no API key is configured or the rate limit is zero
    #[instrument(skip(config), fields(provider = %config.provider, model = %config.model))]
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(format!(
                    "{} is not set",
                    config.provider.api_key_env_var()
                ))
            })?;
        let per_minute = NonZeroU32::new(config.requests_per_minute).ok_or_else(|| {
            Error::Config("requests_per_minute must be greater than zero".to_string())
        })?;
        let limiter = RateLimiter::direct(Quota::per_minute(per_minute));

        let model = match config.provider {
            LlmProvider::OpenAi => {
                let client = match config.api_base.as_deref() {
                    Some(base_url) => openai::Client::from_url(api_key, base_url),
                    None => openai::Client::new(api_key),
                };
                Self::OpenAi(
                    RateLimitedCompletionModel::new(client.completion_model(&config.model), limiter)
                        .with_temperature(config.temperature),
                )
            }
            LlmProvider::Gemini => {
                let client = gemini::Client::new(api_key);
                Self::Gemini(
                    RateLimitedCompletionModel::new(client.completion_model(&config.model), limiter)
                        .with_temperature(config.temperature),
                )
            }
        };
        info!("Completion model ready");
        Ok(model)
    }
}

impl CompletionClient for ProviderModel {
    async fn complete(&self, preamble: &str, prompt: &str) -> std::result::Result<String, ModelError> {
        match self {
            Self::OpenAi(model) => model.complete(preamble, prompt).await,
            Self::Gemini(model) => model.complete(preamble, prompt).await,
        }
    }
}
