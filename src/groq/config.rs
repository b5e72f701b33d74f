//! Groq client configuration.

use crate::error::{Error, Result};

/// Configuration for the Groq client.
///
/// The credential is an explicit value here rather than ambient process
/// state; construction of the client fails when it is empty.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Model used for text-only requests.
    pub text_model: String,
    /// Model used for requests carrying an image or audio clip.
    pub multimodal_model: String,
    /// Default sampling temperature.
    pub temperature: Option<f32>,
    /// Default completion token limit.
    pub max_completion_tokens: Option<u32>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl GroqConfig {
    /// Default Groq API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.groq.com/openai/v1";
    /// Default text model.
    pub const DEFAULT_TEXT_MODEL: &'static str = "llama-3.3-70b-versatile";
    /// Default multimodal model.
    pub const DEFAULT_MULTIMODAL_MODEL: &'static str =
        "meta-llama/llama-4-scout-17b-16e-instruct";

    /// Creates a new configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            text_model: Self::DEFAULT_TEXT_MODEL.to_owned(),
            multimodal_model: Self::DEFAULT_MULTIMODAL_MODEL.to_owned(),
            temperature: None,
            max_completion_tokens: Some(1024),
            timeout_secs: Some(120),
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Reads from:
    /// - `GROQ_API_KEY` - Required API key
    /// - `GROQ_BASE_URL` - Optional base URL
    /// - `GROQ_MODEL` - Optional text model
    /// - `GROQ_MULTIMODAL_MODEL` - Optional multimodal model
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `GROQ_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::config("GROQ_API_KEY not found, please check your environment or .env file")
            })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("GROQ_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("GROQ_MODEL") {
            config.text_model = model;
        }
        if let Ok(model) = std::env::var("GROQ_MULTIMODAL_MODEL") {
            config.multimodal_model = model;
        }

        Ok(config)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the text model.
    #[must_use]
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Sets the multimodal model.
    #[must_use]
    pub fn with_multimodal_model(mut self, model: impl Into<String>) -> Self {
        self.multimodal_model = model.into();
        self
    }

    /// Sets the default sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults() {
        let config = GroqConfig::new("gsk-test");

        assert_eq!(config.api_key, "gsk-test");
        assert_eq!(config.base_url, GroqConfig::DEFAULT_BASE_URL);
        assert_eq!(config.text_model, GroqConfig::DEFAULT_TEXT_MODEL);
        assert_eq!(config.multimodal_model, GroqConfig::DEFAULT_MULTIMODAL_MODEL);
        assert_eq!(config.max_completion_tokens, Some(1024));
    }

    #[test]
    fn builders_override_defaults() {
        let config = GroqConfig::new("gsk-test")
            .with_base_url("http://localhost:8080/v1")
            .with_text_model("llama-3.1-8b-instant")
            .with_timeout(30);

        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.text_model, "llama-3.1-8b-instant");
        assert_eq!(config.timeout_secs, Some(30));
    }
}
