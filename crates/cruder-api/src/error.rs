//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Domain errors map onto status codes here and nowhere else. Storage causes
//! are logged with their full source chain but never sent to the client.

use std::collections::BTreeMap;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// A business rule rejected the input.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// The body could not be parsed at all.
  #[error("invalid request: {0}")]
  InvalidRequest(String),

  /// The body parsed but one or more fields broke a format rule.
  #[error("validation failed")]
  Validation(BTreeMap<&'static str, String>),

  #[error("internal error")]
  Internal(#[source] cruder_core::Error),
}

impl From<cruder_core::Error> for ApiError {
  fn from(e: cruder_core::Error) -> Self {
    use cruder_core::Error as E;
    match e {
      E::NotFound => ApiError::NotFound("user not found".to_owned()),
      E::UsernameConflict(_) => ApiError::Conflict("Username already exists".to_owned()),
      E::EmailConflict(_) => ApiError::Conflict("Email already exists".to_owned()),
      E::InvalidInput(msg) => ApiError::InvalidInput(msg),
      e @ E::Storage(_) => ApiError::Internal(e),
    }
  }
}

/// Render an error and its causes as `a: b: c` for logging.
fn chain(e: &dyn std::error::Error) -> String {
  let mut out = e.to_string();
  let mut cur = e.source();
  while let Some(inner) = cur {
    out.push_str(": ");
    out.push_str(&inner.to_string());
    cur = inner.source();
  }
  out
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, json!({ "error": "Not found", "message": m }))
      }
      ApiError::Conflict(m) => {
        (StatusCode::CONFLICT, json!({ "error": "Conflict", "message": m }))
      }
      ApiError::InvalidInput(m) => (
        StatusCode::BAD_REQUEST,
        json!({ "error": "Invalid input", "message": m }),
      ),
      ApiError::InvalidRequest(m) => (
        StatusCode::BAD_REQUEST,
        json!({ "error": "Invalid request", "message": m }),
      ),
      ApiError::Validation(details) => (
        StatusCode::BAD_REQUEST,
        json!({
          "error":   "Validation failed",
          "message": "Invalid input data",
          "details": details,
        }),
      ),
      ApiError::Internal(e) => {
        tracing::error!(error = %chain(e), "request failed on storage");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({
            "error":   "Internal server error",
            "message": "the request could not be completed",
          }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
