//! API error type and its [`axum::response::IntoResponse`] implementation.
//!
//! Every error is recovered at the request boundary into the standard
//! envelope; none is fatal to the process.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::Envelope;

/// An error returned by an API handler. The display string is the exact
/// message sent to the client.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Bad input: missing field, bad enum value, short password, or failed
  /// login (deliberately indistinguishable from an unknown user).
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  NotFound(String),

  /// Caller exists but lacks the role the operation requires.
  #[error("{0}")]
  Authorization(String),

  /// Duplicate registration or duplicate complaint text.
  #[error("{0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("internal error: {0}")]
  Internal(String),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    Envelope::error(self.to_string()).into_response()
  }
}

/// Wrap a backend error for the envelope.
pub(crate) fn store_err<E>(err: E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ApiError::Store(Box::new(err))
}

/// Reject a missing required field with its per-field message.
pub(crate) fn require(value: Option<String>, message: &str) -> Result<String, ApiError> {
  value.ok_or_else(|| ApiError::Validation(message.to_string()))
}
