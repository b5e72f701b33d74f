//! Omnichat - a multimodal chat front-end for Groq's OpenAI-compatible API.
//!
//! This crate forwards user-supplied text, an image, and/or an audio clip to
//! a multimodal chat-completion endpoint and hands back the textual answer.
//! The [`adapter::Assistant`] assembles one outbound request per call; the
//! [`server`] module hosts the local web page the operator interacts with.

pub mod adapter;
pub mod chat;
pub mod error;
pub mod groq;
pub mod media;
pub mod message;
pub mod server;

pub use adapter::{Assistant, MultimodalRequest};
pub use error::{ApiError, Error, FAILURE_MARKER, Result};
