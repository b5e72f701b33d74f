//! Unified error types for the omnichat crate.
//!
//! Failures fall into three families: configuration (a missing or empty
//! credential, caught before any call is attempted), API (anything that goes
//! wrong while reaching or talking to the inference service), and media (a
//! referenced image/audio file that cannot be read). All of them render to a
//! single user-visible string at the adapter boundary via
//! [`Error::user_message`]; none escapes as a panic.

/// Result type alias for omnichat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix carried by every user-visible failure string.
pub const FAILURE_MARKER: &str = "❌ Error:";

/// The main error type for omnichat operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration error, detected before any call is attempted.
    #[error("{0}")]
    Config(String),

    /// Failure reported by, or while reaching, the inference API.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A referenced media file could not be read.
    #[error("cannot read media file {path}: {source}")]
    Media {
        /// Path of the unreadable file.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The request carried no text, image, or audio.
    #[error("nothing to send: provide text, an image, or an audio clip")]
    EmptyRequest,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a media error for an unreadable file.
    #[must_use]
    pub fn media(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Media {
            path: path.into(),
            source,
        }
    }

    /// Render the error as a user-displayable string.
    ///
    /// The returned string always begins with [`FAILURE_MARKER`] so the
    /// presentation layer can show it verbatim in place of an answer.
    #[must_use]
    pub fn user_message(&self) -> String {
        format!("{FAILURE_MARKER} {self}")
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Api(err.into())
    }
}

/// Error type for inference API operations.
///
/// Each variant represents a distinct failure mode so callers can
/// pattern-match on specific cases where they need to.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Authentication or authorization failure.
    #[error("[{provider}] {message}")]
    Auth {
        /// Provider name (e.g. "groq").
        provider: String,
        /// Error description.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("[{provider}] rate limit exceeded, retry after some time")]
    RateLimited {
        /// Provider name.
        provider: String,
    },

    /// Response format error.
    #[error("expected {expected}, got {got}")]
    ResponseFormat {
        /// Expected format description.
        expected: String,
        /// Actual format received.
        got: String,
    },

    /// Network or connection error.
    #[error("{0}")]
    Network(String),

    /// HTTP status error.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Provider-reported error.
    #[error("[{provider}] {message}")]
    Provider {
        /// Provider name.
        provider: String,
        /// Error description.
        message: String,
        /// Optional error code from the provider.
        code: Option<String>,
    },

    /// Internal error.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Create an authentication error.
    #[must_use]
    pub fn auth(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a rate limit error.
    #[must_use]
    pub fn rate_limited(provider: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
        }
    }

    /// Create a response format error.
    #[must_use]
    pub fn response_format(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::ResponseFormat {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create an HTTP status error.
    #[must_use]
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a provider-reported error.
    #[must_use]
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Create a provider error with an error code.
    #[must_use]
    pub fn provider_code(
        provider: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a transient error a caller could retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network("request timed out")
        } else if err.is_connect() {
            Self::network(format!("connection failed: {err}"))
        } else {
            Self::network(err.to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    mod error {
        use super::*;

        #[test]
        fn config_creates_error() {
            let err = Error::config("GROQ_API_KEY not set");
            assert!(matches!(err, Error::Config(_)));
            assert!(err.to_string().contains("GROQ_API_KEY"));
        }

        #[test]
        fn media_carries_path() {
            let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
            let err = Error::media("/tmp/missing.png", io);
            let s = err.to_string();
            assert!(s.contains("/tmp/missing.png"));
            assert!(s.contains("no such file"));
        }

        #[test]
        fn empty_request_display() {
            assert!(Error::EmptyRequest.to_string().contains("nothing to send"));
        }

        #[test]
        fn from_api_error() {
            let err: Error = ApiError::network("timeout").into();
            assert!(matches!(err, Error::Api(_)));
        }

        #[test]
        fn user_message_starts_with_marker() {
            let err = Error::config("GROQ_API_KEY not set");
            assert!(err.user_message().starts_with(FAILURE_MARKER));

            let err: Error = ApiError::network("connection refused").into();
            assert!(err.user_message().starts_with(FAILURE_MARKER));
        }

        #[test]
        fn api_error_display_is_transparent() {
            let err: Error = ApiError::auth("groq", "invalid key").into();
            assert_eq!(err.to_string(), "[groq] invalid key");
        }
    }

    mod api_error {
        use super::*;

        #[test]
        fn auth_creates_error() {
            let err = ApiError::auth("groq", "invalid API key");
            assert!(matches!(err, ApiError::Auth { .. }));
            let s = err.to_string();
            assert!(s.contains("[groq]"));
            assert!(s.contains("invalid API key"));
        }

        #[test]
        fn rate_limited_creates_error() {
            let err = ApiError::rate_limited("groq");
            assert!(err.to_string().contains("rate limit"));
        }

        #[test]
        fn http_status_creates_error() {
            let err = ApiError::http_status(503, "Service Unavailable");
            let s = err.to_string();
            assert!(s.contains("503"));
            assert!(s.contains("Service Unavailable"));
        }

        #[test]
        fn provider_code_creates_error() {
            let err = ApiError::provider_code("groq", "model_not_found", "unknown model");
            if let ApiError::Provider { code, .. } = &err {
                assert_eq!(code.as_deref(), Some("model_not_found"));
            } else {
                panic!("expected ApiError::Provider");
            }
        }

        #[test]
        fn response_format_mentions_both_sides() {
            let err = ApiError::response_format("at least one choice", "empty choices");
            let s = err.to_string();
            assert!(s.contains("at least one choice"));
            assert!(s.contains("empty choices"));
        }

        #[test]
        fn is_retryable_classification() {
            assert!(ApiError::rate_limited("groq").is_retryable());
            assert!(ApiError::network("timeout").is_retryable());
            assert!(!ApiError::auth("groq", "bad key").is_retryable());
            assert!(!ApiError::internal("bug").is_retryable());
        }
    }
}
