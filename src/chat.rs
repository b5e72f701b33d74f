//! Chat request/response types and the provider trait.
//!
//! [`ChatRequest`] doubles as the serialized request body: it aligns with the
//! OpenAI Chat Completions parameters the endpoint understands, with unset
//! options omitted from the JSON. [`ChatProvider`] is the seam between the
//! adapter and a concrete backend, which lets tests substitute a stub.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

/// A chat completion request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier.
    #[serde(default)]
    pub model: String,

    /// Conversation messages.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Sampling temperature (0.0 to 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens the model may generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
}

impl ChatRequest {
    /// Creates a new request for the given model.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Adds a message.
    #[must_use]
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Adds a system message.
    #[must_use]
    pub fn system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::system(content));
        self
    }

    /// Adds a user message.
    #[must_use]
    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the completion token limit.
    #[must_use]
    pub const fn max_completion_tokens(mut self, tokens: u32) -> Self {
        self.max_completion_tokens = Some(tokens);
        self
    }
}

/// Token usage statistics reported by the endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt.
    #[serde(default, alias = "prompt_tokens")]
    pub input_tokens: u32,
    /// Tokens in the completion.
    #[serde(default, alias = "completion_tokens")]
    pub output_tokens: u32,
    /// Total tokens used.
    #[serde(default)]
    pub total_tokens: u32,
}

/// A parsed chat completion response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// The textual answer.
    pub text: String,
    /// Model that produced the answer.
    pub model: Option<String>,
    /// Response identifier.
    pub id: Option<String>,
    /// Token usage, when reported.
    pub usage: Option<Usage>,
}

/// A backend able to answer chat completion requests.
///
/// One outbound call per [`chat`](Self::chat) invocation; implementations
/// hold no per-call state and are safe to share across tasks.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a chat completion request and return the parsed response.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Name of the backing provider (e.g. "groq").
    fn provider_name(&self) -> &'static str;
}
