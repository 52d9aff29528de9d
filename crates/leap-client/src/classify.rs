//! Outcome classification of a raw HTTP response.
//!
//! A response is either a success whose body is left for the caller to
//! decode, a structured [`ApiError`], or a generic [`HttpError`]. A body that
//! decodes as an `ApiError` but holds only zero values counts as "no
//! structured error", exactly like a body that does not decode at all.

use bytes::Bytes;
use reqwest::StatusCode;

use crate::error::{Error, HttpError, Result};
use crate::types::ApiError;

/// Result of classifying a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// 2xx; carries the undecoded body.
    Success(Bytes),
    /// Non-2xx with a non-empty structured error body.
    Api(ApiError),
    /// Non-2xx without a usable structured error body.
    Status(HttpError),
}

impl Classified {
    /// Convert into the body on success, or the surfaced error otherwise.
    pub fn into_result(self) -> Result<Bytes> {
        match self {
            Classified::Success(body) => Ok(body),
            Classified::Api(err) => Err(Error::Api(err)),
            Classified::Status(err) => Err(Error::Status(err)),
        }
    }
}

/// Classify a status code and body.
pub fn classify(status: StatusCode, body: Bytes) -> Classified {
    if status.is_success() {
        return Classified::Success(body);
    }

    match serde_json::from_slice::<ApiError>(&body) {
        Ok(err) if !err.is_empty() => Classified::Api(ApiError {
            http_status: status.as_u16(),
            ..err
        }),
        _ => Classified::Status(HttpError::new(status.as_u16())),
    }
}
