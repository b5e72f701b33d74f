//! Groq API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::error::{ApiError, Error, Result};

use super::config::GroqConfig;
use super::types::ErrorResponse;

/// Name reported in provider-tagged errors.
pub(crate) const PROVIDER: &str = "groq";

/// Groq API client.
#[derive(Debug, Clone)]
pub struct Groq {
    pub(crate) config: Arc<GroqConfig>,
    pub(crate) client: Client,
}

impl Groq {
    /// Create a new Groq client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty API key and propagates HTTP
    /// client construction failures.
    pub fn new(config: GroqConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::config("Groq API key is required"));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `GROQ_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::new(GroqConfig::from_env()?)
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the text model.
    #[must_use]
    pub fn text_model(&self) -> &str {
        &self.config.text_model
    }

    /// Get the multimodal model.
    #[must_use]
    pub fn multimodal_model(&self) -> &str {
        &self.config.multimodal_model
    }

    /// Build the chat completions URL.
    pub(crate) fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Build an authenticated JSON request.
    pub(crate) fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
    }

    /// Parse an error response body into an [`ApiError`].
    pub(crate) fn parse_error(status: u16, body: &str) -> ApiError {
        if let Ok(response) = serde_json::from_str::<ErrorResponse>(body) {
            let error = response.error;
            let code = error.code.unwrap_or(error.kind);

            return match status {
                401 | 403 => ApiError::auth(PROVIDER, error.message),
                429 => ApiError::rate_limited(PROVIDER),
                _ => ApiError::provider_code(PROVIDER, code, error.message),
            };
        }

        ApiError::http_status(status, body.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn test_client() -> Groq {
        Groq::new(GroqConfig::new("gsk-test")).unwrap()
    }

    #[test]
    fn empty_key_is_rejected_before_any_call() {
        let err = Groq::new(GroqConfig::new("")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn chat_url_joins_base() {
        let client = test_client();
        assert_eq!(
            client.chat_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn chat_url_honors_base_override() {
        let client =
            Groq::new(GroqConfig::new("gsk-test").with_base_url("http://localhost:1234/v1"))
                .unwrap();
        assert_eq!(client.chat_url(), "http://localhost:1234/v1/chat/completions");
    }

    mod parse_error {
        use super::*;

        #[test]
        fn unauthorized_maps_to_auth() {
            let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error", "code": "invalid_api_key"}}"#;
            let err = Groq::parse_error(401, body);
            assert!(matches!(err, ApiError::Auth { .. }));
        }

        #[test]
        fn too_many_requests_maps_to_rate_limited() {
            let body = r#"{"error": {"message": "Rate limit reached", "type": "tokens", "code": "rate_limit_exceeded"}}"#;
            let err = Groq::parse_error(429, body);
            assert!(matches!(err, ApiError::RateLimited { .. }));
        }

        #[test]
        fn other_statuses_keep_provider_code() {
            let body = r#"{"error": {"message": "The model `x` does not exist", "type": "invalid_request_error", "code": "model_not_found"}}"#;
            let err = Groq::parse_error(404, body);
            if let ApiError::Provider { code, message, .. } = err {
                assert_eq!(code.as_deref(), Some("model_not_found"));
                assert!(message.contains("does not exist"));
            } else {
                panic!("expected ApiError::Provider");
            }
        }

        #[test]
        fn unparseable_body_falls_back_to_http_status() {
            let err = Groq::parse_error(502, "<html>Bad Gateway</html>");
            assert!(matches!(err, ApiError::HttpStatus { status: 502, .. }));
        }
    }
}
