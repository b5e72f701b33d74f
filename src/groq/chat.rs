//! Groq `ChatProvider` implementation.

use async_trait::async_trait;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse};
use crate::error::{ApiError, Result};

use super::client::{Groq, PROVIDER};
use super::types::ChatCompletionResponse;

impl Groq {
    /// Fill unset request fields from the configured defaults.
    fn apply_defaults(&self, request: &ChatRequest) -> ChatRequest {
        let mut body = request.clone();
        if body.model.is_empty() {
            body.model = self.config.text_model.clone();
        }
        if body.temperature.is_none() {
            body.temperature = self.config.temperature;
        }
        if body.max_completion_tokens.is_none() {
            body.max_completion_tokens = self.config.max_completion_tokens;
        }
        body
    }

    /// Parse the wire response into a [`ChatResponse`].
    pub(crate) fn parse_response(response: ChatCompletionResponse) -> Result<ChatResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::response_format("at least one choice", "empty choices"))?;

        let text = choice.message.content.unwrap_or_default();

        Ok(ChatResponse {
            text,
            model: Some(response.model),
            id: Some(response.id),
            usage: response.usage,
        })
    }
}

#[async_trait]
impl ChatProvider for Groq {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.chat_url();
        let body = self.apply_defaults(request);

        tracing::debug!(model = %body.model, messages = body.messages.len(), "chat request");

        let response = self
            .build_request(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &error_text).into());
        }

        let response_text = response.text().await.map_err(ApiError::from)?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text).map_err(|e| {
            ApiError::response_format(
                "valid chat completion response",
                format!("parse error: {e}, response: {response_text}"),
            )
        })?;

        let parsed = Self::parse_response(parsed)?;
        tracing::debug!(
            model = parsed.model.as_deref().unwrap_or_default(),
            chars = parsed.text.len(),
            "chat response"
        );

        Ok(parsed)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
