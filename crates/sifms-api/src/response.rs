//! The uniform response envelope.
//!
//! Every endpoint answers HTTP 200 and signals failure through the in-body
//! `status` field — a compatibility requirement of the existing surface.
//! That policy lives entirely here; swapping it for real HTTP status codes
//! would not touch any handler.

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;

use crate::error::ApiError;

/// Body shape of every response: `{status, message, data?}`, plus a
/// `total_complaints` count on the listing endpoints.
#[derive(Debug, Serialize)]
pub struct Envelope {
  status:  &'static str,
  message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  total_complaints: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  data: Option<serde_json::Value>,
}

impl Envelope {
  pub fn success(
    message: impl Into<String>,
    data: impl Serialize,
  ) -> Result<Self, ApiError> {
    Ok(Self {
      status:           "success",
      message:          message.into(),
      total_complaints: None,
      data:             Some(to_value(data)?),
    })
  }

  /// Success with a `total_complaints` count alongside the data.
  pub fn success_list(
    message: impl Into<String>,
    total: usize,
    data: impl Serialize,
  ) -> Result<Self, ApiError> {
    Ok(Self {
      status:           "success",
      message:          message.into(),
      total_complaints: Some(total),
      data:             Some(to_value(data)?),
    })
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self {
      status:           "error",
      message:          message.into(),
      total_complaints: None,
      data:             None,
    }
  }
}

fn to_value(data: impl Serialize) -> Result<serde_json::Value, ApiError> {
  serde_json::to_value(data).map_err(|e| ApiError::Internal(e.to_string()))
}

impl IntoResponse for Envelope {
  fn into_response(self) -> Response {
    (StatusCode::OK, Json(self)).into_response()
  }
}
