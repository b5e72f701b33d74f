//! Wire types for Groq chat completion responses.

use serde::Deserialize;

use crate::chat::Usage;

/// Chat completion response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

/// Message inside a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details inside an error response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_completion_response() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "llama-3.3-70b-versatile",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hi, I can help with..."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.id, "chatcmpl-123");
        assert_eq!(response.choices.len(), 1);
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("Hi, I can help with...")
        );
        assert_eq!(response.usage.unwrap().total_tokens, 21);
    }

    #[test]
    fn tolerates_missing_usage_and_content() {
        let json = r#"{
            "id": "chatcmpl-456",
            "model": "m",
            "choices": [{"message": {"role": "assistant"}}]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();

        assert!(response.usage.is_none());
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn deserializes_error_body() {
        let json = r#"{
            "error": {
                "message": "Invalid API Key",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        }"#;

        let response: ErrorResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.error.message, "Invalid API Key");
        assert_eq!(response.error.kind, "invalid_request_error");
        assert_eq!(response.error.code.as_deref(), Some("invalid_api_key"));
    }
}
