//! Local web UI server (the presentation layer).
//!
//! Serves the embedded chat page plus two JSON endpoints: `POST /api/chat`
//! accepts a multipart form (text field, optional image and audio files) and
//! answers with `{answer, status}`; `POST /api/clear` resets every field.
//! Uploads are staged to uniquely named temporary files so the adapter only
//! ever sees file references, and are removed once the call finishes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::extract::{DefaultBodyLimit, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::adapter::{Assistant, MultimodalRequest};
use crate::chat::ChatProvider;
use crate::error::{Error, FAILURE_MARKER, Result};
use crate::groq::Groq;

/// Host the UI server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Port the UI server binds to.
pub const DEFAULT_PORT: u16 = 7860;

/// Status shown when nothing is in flight.
pub const STATUS_IDLE: &str = "🟢 Ready";
/// Status shown after a successful call.
pub const STATUS_DONE: &str = "✅ Completed";
/// Status shown when the credential was absent at startup.
pub const STATUS_MISSING_CONFIG: &str = "❌ Missing configuration";

/// Largest accepted request body (covers image + audio uploads).
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Configuration for the UI server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl ServerConfig {
    /// The bind address as `host:port`.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

/// The adapter the server forwards requests to.
///
/// `Disabled` keeps the UI alive when no credential was configured: every
/// chat reply then carries the configuration-error string instead of an
/// answer.
#[derive(Debug)]
pub enum Backend<P = Groq> {
    /// A working adapter.
    Ready(Assistant<P>),
    /// No adapter; the contained string explains why.
    Disabled(String),
}

/// Shared server state.
#[derive(Debug)]
pub struct AppState<P = Groq> {
    backend: Arc<Backend<P>>,
}

impl<P> AppState<P> {
    /// Creates server state around a backend.
    #[must_use]
    pub fn new(backend: Backend<P>) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

/// Reply to a chat call: the answer text and a short status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// Answer text, or a failure-marker string.
    pub answer: String,
    /// Human-readable status.
    pub status: String,
}

/// Reply to a clear call: every field reset to its empty value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearReply {
    /// Cleared text input.
    pub text: String,
    /// Cleared answer box.
    pub answer: String,
    /// Idle status indicator.
    pub status: String,
}

/// Build the application router.
pub fn router<P>(state: AppState<P>) -> Router
where
    P: ChatProvider + Clone + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat::<P>))
        .route("/api/clear", post(clear))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener and run the server until it fails or is shut down.
///
/// # Errors
///
/// Returns [`Error::Io`] when binding or serving fails.
pub async fn serve<P>(config: ServerConfig, state: AppState<P>) -> Result<()>
where
    P: ChatProvider + Clone + 'static,
{
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!(addr = %config.addr(), "UI server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn clear() -> Json<ClearReply> {
    Json(ClearReply {
        text: String::new(),
        answer: String::new(),
        status: STATUS_IDLE.to_owned(),
    })
}

async fn chat<P>(State(state): State<AppState<P>>, multipart: Multipart) -> Json<ChatReply>
where
    P: ChatProvider + Clone + 'static,
{
    let assistant = match state.backend.as_ref() {
        Backend::Ready(assistant) => assistant,
        Backend::Disabled(reason) => {
            return Json(ChatReply {
                answer: format!("{FAILURE_MARKER} {reason}"),
                status: STATUS_MISSING_CONFIG.to_owned(),
            });
        }
    };

    let staged = match read_form(multipart).await {
        Ok(form) => match stage_request(form).await {
            Ok(staged) => staged,
            Err(e) => return Json(failure_reply(&e)),
        },
        Err(e) => return Json(failure_reply(&e)),
    };

    let answer = assistant.reply(&staged.request).await;
    let status = if answer.starts_with(FAILURE_MARKER) {
        answer.clone()
    } else {
        STATUS_DONE.to_owned()
    };

    staged.cleanup().await;

    Json(ChatReply { answer, status })
}

fn failure_reply(error: &Error) -> ChatReply {
    let message = error.user_message();
    ChatReply {
        status: message.clone(),
        answer: message,
    }
}

/// Decoded multipart form fields.
#[derive(Debug, Default)]
struct ChatForm {
    text: Option<String>,
    image: Option<Upload>,
    audio: Option<Upload>,
}

/// A file upload from the form.
#[derive(Debug)]
struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

/// A request whose media fields point at staged temporary files.
#[derive(Debug)]
struct StagedRequest {
    request: MultimodalRequest,
    files: Vec<PathBuf>,
}

impl StagedRequest {
    /// Remove staged files, best-effort.
    async fn cleanup(self) {
        for file in self.files {
            if let Err(e) = tokio::fs::remove_file(&file).await {
                tracing::debug!(file = %file.display(), "failed to remove staged file: {e}");
            }
        }
    }
}

async fn read_form(mut multipart: Multipart) -> Result<ChatForm> {
    let mut form = ChatForm::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "text" => form.text = Some(field.text().await.map_err(form_error)?),
            "image" => form.image = read_upload(field).await?,
            "audio" => form.audio = read_upload(field).await?,
            _ => {}
        }
    }

    Ok(form)
}

async fn read_upload(field: Field<'_>) -> Result<Option<Upload>> {
    let file_name = field.file_name().unwrap_or_default().to_owned();
    let bytes = field.bytes().await.map_err(form_error)?.to_vec();

    // Browsers submit an empty file field when nothing was picked.
    if bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(Upload { file_name, bytes }))
}

fn form_error(error: MultipartError) -> Error {
    Error::Io(std::io::Error::other(error))
}

async fn stage_request(form: ChatForm) -> Result<StagedRequest> {
    let mut request = MultimodalRequest::new();
    let mut files = Vec::new();

    if let Some(text) = form.text {
        request = request.text(text);
    }
    if let Some(upload) = form.image {
        let path = stage_upload(&upload, "png").await?;
        request = request.image_path(&path);
        files.push(path);
    }
    if let Some(upload) = form.audio {
        let path = stage_upload(&upload, "wav").await?;
        request = request.audio_path(&path);
        files.push(path);
    }

    Ok(StagedRequest { request, files })
}

/// Write an upload to a uniquely named temp file, keeping a sane extension
/// from the client file name so format detection has something to go on.
async fn stage_upload(upload: &Upload, default_ext: &str) -> Result<PathBuf> {
    let ext = Path::new(&upload.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.len() <= 5 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(|| default_ext.to_owned(), str::to_ascii_lowercase);

    let path = std::env::temp_dir().join(format!("omnichat-{}.{ext}", Uuid::new_v4()));
    tokio::fs::write(&path, &upload.bytes).await?;

    Ok(path)
}
