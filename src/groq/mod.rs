//! Groq provider client (OpenAI-compatible chat completions).

mod chat;
mod client;
mod config;
mod types;

pub use client::Groq;
pub use config::GroqConfig;
