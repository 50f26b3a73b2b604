//! Per-request tracing hooks and panic recovery.
//!
//! Every request carries an `x-request-id` (taken from the client or minted
//! as a v4 UUID) that is recorded on its span and echoed on the response.
//! Outcomes are logged at a level chosen by status: 5xx at ERROR, 4xx at
//! WARN, everything else at INFO.

use std::{any::Any, time::Duration};

use axum::{
  Json,
  http::{Request, Response, StatusCode},
  response::IntoResponse,
};
use serde_json::json;
use tracing::Span;

pub const REQUEST_ID: &str = "x-request-id";

/// Span for one request, tagged with its id.
pub fn request_span<B>(req: &Request<B>) -> Span {
  let request_id = req
    .headers()
    .get(REQUEST_ID)
    .and_then(|v| v.to_str().ok())
    .unwrap_or("-");
  tracing::info_span!(
    "request",
    method = %req.method(),
    path = %req.uri().path(),
    request_id,
  )
}

pub fn log_response<B>(resp: &Response<B>, latency: Duration, _span: &Span) {
  let status = resp.status().as_u16();
  if resp.status().is_server_error() {
    tracing::error!(status, ?latency, "request failed");
  } else if resp.status().is_client_error() {
    tracing::warn!(status, ?latency, "request rejected");
  } else {
    tracing::info!(status, ?latency, "request completed");
  }
}

/// Turn a handler panic into the same 500 body as any other internal error.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> axum::response::Response {
  let detail = err
    .downcast_ref::<String>()
    .map(String::as_str)
    .or_else(|| err.downcast_ref::<&str>().copied())
    .unwrap_or("non-string panic payload");
  tracing::error!(panic = detail, "handler panicked");

  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(json!({
      "error":   "Internal server error",
      "message": "the request could not be completed",
    })),
  )
    .into_response()
}
