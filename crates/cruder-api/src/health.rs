//! Liveness and readiness probes.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/health` | Always 200 while the process is serving |
//! | `GET`  | `/ready`  | 200 if the store answers a ping, else 503 |

use std::collections::BTreeMap;

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use cruder_core::store::UserStore;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
  pub status:    &'static str,
  pub timestamp: DateTime<Utc>,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub checks:    BTreeMap<&'static str, String>,
}

/// `GET /health`
pub async fn liveness() -> Json<HealthResponse> {
  Json(HealthResponse {
    status:    "ok",
    timestamp: Utc::now(),
    checks:    BTreeMap::new(),
  })
}

/// `GET /ready`
pub async fn readiness<S>(
  State(state): State<AppState<S>>,
) -> (StatusCode, Json<HealthResponse>)
where
  S: UserStore + Clone + 'static,
{
  let mut checks = BTreeMap::new();
  let (status, label) = match state.users.ping().await {
    Ok(()) => {
      checks.insert("database", "healthy".to_owned());
      (StatusCode::OK, "ready")
    }
    Err(e) => {
      tracing::warn!(error = %e, "readiness check failed");
      checks.insert("database", "unhealthy".to_owned());
      (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    }
  };

  (
    status,
    Json(HealthResponse { status: label, timestamp: Utc::now(), checks }),
  )
}
