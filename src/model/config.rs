//! Completion service configuration

use std::fmt;
use std::str::FromStr;

/// Supported completion providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    #[default]
    OpenAi,
    Gemini,
}

impl LlmProvider {
    /// Environment variable the CLI reads the credential from
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Model used when none is configured
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Gemini => "gemini-2.0-flash",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Gemini => write!(f, "gemini"),
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            other => Err(format!("unknown provider '{other}' (expected openai or gemini)")),
        }
    }
}

/// Configuration for the completion service
#[derive(Clone)]
pub struct ModelConfig {
    /// Which provider to call
    pub provider: LlmProvider,

    /// Model name passed to the provider
    pub model: String,

    /// Credential; `None` is a configuration error when building the model
    pub api_key: Option<String>,

    /// Base URL for OpenAI-compatible endpoints
    pub api_base: Option<String>,

    /// Sampling temperature
    pub temperature: f64,

    /// Client-side rate limit
    pub requests_per_minute: u32,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("requests_per_minute", &self.requests_per_minute)
            .finish()
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        let provider = LlmProvider::default();
        Self {
            provider,
            model: provider.default_model().to_string(),
            api_key: None,
            api_base: None,
            temperature: 0.2,
            requests_per_minute: 500,
        }
    }
}

/// Builder for ModelConfig
#[derive(Debug, Default)]
pub struct ModelConfigBuilder {
    config: ModelConfig,
    model_set: bool,
}

impl ModelConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider. Also switches the model to the provider's default
    /// unless one was set explicitly.
    pub fn provider(mut self, provider: LlmProvider) -> Self {
        self.config.provider = provider;
        if !self.model_set {
            self.config.model = provider.default_model().to_string();
        }
        self
    }

    /// Set the model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self.model_set = true;
        self
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Set an optional API key
    pub fn maybe_api_key(mut self, api_key: Option<String>) -> Self {
        self.config.api_key = api_key;
        self
    }

    /// Set the base URL for OpenAI-compatible endpoints
    pub fn api_base(mut self, api_base: Option<String>) -> Self {
        self.config.api_base = api_base;
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the client-side rate limit
    pub fn requests_per_minute(mut self, requests_per_minute: u32) -> Self {
        self.config.requests_per_minute = requests_per_minute;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ModelConfig {
        self.config
    }
}

impl ModelConfig {
    /// Create a new builder
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("openai".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAi);
        assert_eq!("Gemini".parse::<LlmProvider>().unwrap(), LlmProvider::Gemini);
        assert!("claude".parse::<LlmProvider>().is_err());
        assert_eq!(LlmProvider::Gemini.to_string(), "gemini");
    }

    #[test]
    fn test_provider_switch_follows_default_model() {
        let config = ModelConfig::builder().provider(LlmProvider::Gemini).build();
        assert_eq!(config.model, "gemini-2.0-flash");

        let config = ModelConfig::builder()
            .model("custom")
            .provider(LlmProvider::Gemini)
            .build();
        assert_eq!(config.model, "custom");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ModelConfig::builder().api_key("sk-secret").build();
        let debug = format!("{config:?}");

        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
