//! Client error types.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ApiError;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The base URL or a request URL failed to parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL has no host to put in the `Host` header.
    #[error("Invalid URL: '{0}' has no host")]
    MissingHost(String),

    /// The resolved host is not a valid header value.
    #[error("Invalid Host header value: {0:?}")]
    InvalidHost(String),

    /// Transport-level failure (connect, TLS, read).
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The configured request timeout elapsed.
    #[error("Request timed out: deadline exceeded ({0})")]
    Timeout(#[source] reqwest::Error),

    /// The caller's cancellation token fired before the response arrived.
    #[error("Request cancelled: deadline exceeded or cancelled by caller")]
    Cancelled,

    /// The server returned a structured error body.
    #[error("{0}")]
    Api(ApiError),

    /// The server returned a non-success status without a usable error body.
    #[error("{0}")]
    Status(HttpError),

    /// A success response did not decode into the expected model.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err)
        } else {
            Error::Http(err)
        }
    }
}

impl Error {
    /// Check if the call ended on a deadline: a timeout or a cancellation.
    pub fn is_deadline(&self) -> bool {
        self.is_timeout() || self.is_cancelled()
    }

    /// Check if the caller's cancellation token ended the call.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Check if the configured request timeout ended the call.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }

    /// Check if this is a transport failure (no HTTP response was classified).
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Timeout(_) | Error::Cancelled)
    }

    /// Check if the target could not be parsed into a request.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidUrl(_) | Error::MissingHost(_) | Error::InvalidHost(_)
        )
    }

    /// HTTP status code of an error response, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status()),
            Error::Status(err) => Some(err.code),
            _ => None,
        }
    }

    /// The structured error body, if the server sent one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Generic error for a non-success status with no structured body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// HTTP status code.
    pub code: u16,
    /// Optional message; blank means "use the standard reason phrase".
    pub message: String,
}

impl HttpError {
    pub fn new(code: u16) -> Self {
        Self {
            code,
            message: String::new(),
        }
    }

    /// The message, falling back to the reason phrase of `code`.
    pub fn display_message(&self) -> String {
        if self.message.is_empty() {
            reason_phrase(self.code)
        } else {
            self.message.clone()
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.display_message())
    }
}

impl std::error::Error for HttpError {}

/// Standard reason phrase of an HTTP status code, empty when unknown.
pub(crate) fn reason_phrase(code: u16) -> String {
    StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or_default()
        .to_string()
}
