//! The multimodal request adapter.
//!
//! [`Assistant`] turns an operator-supplied [`MultimodalRequest`] (free text
//! plus optional image and audio file references) into exactly one outbound
//! chat completion call and hands back the textual answer. Every failure is
//! caught at this boundary: [`Assistant::reply`] renders errors as a
//! displayable string instead of propagating them.

use std::path::Path;

use crate::chat::{ChatProvider, ChatRequest};
use crate::error::{Error, Result};
use crate::groq::{Groq, GroqConfig};
use crate::media::{AudioAttachment, ImageAttachment};
use crate::message::{ContentPart, Message};

/// A single multimodal request: free text plus optional media references.
///
/// At least one field must be present; an all-absent request is rejected
/// locally before any network call.
#[derive(Debug, Clone, Default)]
pub struct MultimodalRequest {
    text: Option<String>,
    image: Option<ImageAttachment>,
    audio: Option<AudioAttachment>,
}

impl MultimodalRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text input.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attaches an image by file path.
    #[must_use]
    pub fn image_path(mut self, path: impl AsRef<Path>) -> Self {
        self.image = Some(ImageAttachment::from_path(path));
        self
    }

    /// Attaches an audio clip by file path.
    #[must_use]
    pub fn audio_path(mut self, path: impl AsRef<Path>) -> Self {
        self.audio = Some(AudioAttachment::from_path(path));
        self
    }

    /// Whether non-empty text is present.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Whether an image reference is present.
    #[must_use]
    pub const fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Whether an audio reference is present.
    #[must_use]
    pub const fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    /// Whether the request carries anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_text() && !self.has_image() && !self.has_audio()
    }
}

/// The multimodal chat adapter.
///
/// Stateless between calls: the only shared data is the read-only provider
/// configuration, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Assistant<P = Groq> {
    provider: P,
    text_model: String,
    multimodal_model: String,
}

impl Assistant<Groq> {
    /// Creates an assistant backed by the Groq API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the credential is empty.
    pub fn new(config: GroqConfig) -> Result<Self> {
        let text_model = config.text_model.clone();
        let multimodal_model = config.multimodal_model.clone();
        Ok(Self {
            provider: Groq::new(config)?,
            text_model,
            multimodal_model,
        })
    }

    /// Creates an assistant from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `GROQ_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::new(GroqConfig::from_env()?)
    }
}

impl<P: ChatProvider> Assistant<P> {
    /// Creates an assistant over an arbitrary provider.
    #[must_use]
    pub fn with_provider(
        provider: P,
        text_model: impl Into<String>,
        multimodal_model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            text_model: text_model.into(),
            multimodal_model: multimodal_model.into(),
        }
    }

    /// Sends one chat completion request carrying the present modalities.
    ///
    /// Text-only requests are forwarded as a plain string message to the text
    /// model; anything carrying media becomes a content-part array sent to
    /// the multimodal model.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyRequest`] when nothing is present, [`Error::Media`] when
    /// a referenced file cannot be read, and any [`Error::Api`] the provider
    /// reports.
    pub async fn chat(&self, request: &MultimodalRequest) -> Result<String> {
        if request.is_empty() {
            return Err(Error::EmptyRequest);
        }

        let message = self.build_message(request).await?;
        let model = if request.has_image() || request.has_audio() {
            &self.multimodal_model
        } else {
            &self.text_model
        };

        tracing::info!(
            provider = self.provider.provider_name(),
            model = %model,
            text = request.has_text(),
            image = request.has_image(),
            audio = request.has_audio(),
            "forwarding multimodal request"
        );

        let chat_request = ChatRequest::new(model.clone()).message(message);
        let response = self.provider.chat(&chat_request).await?;
        Ok(response.text)
    }

    /// Like [`chat`](Self::chat), but never fails: errors are rendered as a
    /// user-displayable string beginning with
    /// [`FAILURE_MARKER`](crate::FAILURE_MARKER).
    pub async fn reply(&self, request: &MultimodalRequest) -> String {
        match self.chat(request).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("request failed: {e}");
                e.user_message()
            }
        }
    }

    /// Encode the present modalities into a single user message.
    async fn build_message(&self, request: &MultimodalRequest) -> Result<Message> {
        // A bare text request stays a plain string message.
        if !request.has_image() && !request.has_audio() {
            let text = request.text.clone().unwrap_or_default();
            return Ok(Message::user(text));
        }

        let mut parts = Vec::new();
        if request.has_text() {
            let text = request.text.clone().unwrap_or_default();
            parts.push(ContentPart::text(text));
        }
        if let Some(image) = &request.image {
            parts.push(ContentPart::image_url(image.to_data_url().await?));
        }
        if let Some(audio) = &request.audio {
            let encoded = audio.encode().await?;
            parts.push(ContentPart::input_audio(encoded.data, encoded.format));
        }

        Ok(Message::user_parts(parts))
    }
}
