//! Handlers for `/users` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users` | Oldest first |
//! | `GET`    | `/users/username/{username}` | Case-insensitive |
//! | `GET`    | `/users/id/{id}` | 400 on a malformed id, 404 if not found |
//! | `POST`   | `/users` | Body: `{"username","email","full_name"}` |
//! | `PATCH`  | `/users/id/{id}` | Any subset of the create body |
//! | `DELETE` | `/users/id/{id}` | 204 whether or not the row existed |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use cruder_core::{store::UserStore, user::User};
use uuid::Uuid;

use crate::{
  AppState,
  error::ApiError,
  policy::{DeleteOutcome, absorb_missing},
  request::{CreateUserBody, UpdateUserBody},
};

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw)
    .map_err(|_| ApiError::InvalidInput("ID must be a valid UUID".to_owned()))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
  payload
    .map(|Json(b)| b)
    .map_err(|e| ApiError::InvalidRequest(e.body_text()))
}

/// Attach the lookup key to a not-found error.
fn not_found(
  what: impl FnOnce() -> String,
) -> impl FnOnce(cruder_core::Error) -> ApiError {
  move |e| match e {
    cruder_core::Error::NotFound => ApiError::NotFound(what()),
    other => other.into(),
  }
}

// ─── Read ─────────────────────────────────────────────────────────────────────

/// `GET /users`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<User>>, ApiError>
where
  S: UserStore + Clone + 'static,
{
  Ok(Json(state.users.list().await?))
}

/// `GET /users/username/{username}`
pub async fn get_by_username<S>(
  State(state): State<AppState<S>>,
  Path(username): Path<String>,
) -> Result<Json<User>, ApiError>
where
  S: UserStore + Clone + 'static,
{
  let user = state
    .users
    .get_by_username(&username)
    .await
    .map_err(not_found(|| format!("user with username '{username}' not found")))?;
  Ok(Json(user))
}

/// `GET /users/id/{id}`
pub async fn get_by_id<S>(
  State(state): State<AppState<S>>,
  Path(raw): Path<String>,
) -> Result<Json<User>, ApiError>
where
  S: UserStore + Clone + 'static,
{
  let id = parse_id(&raw)?;
  let user = state
    .users
    .get_by_id(id)
    .await
    .map_err(not_found(|| format!("user with id '{id}' not found")))?;
  Ok(Json(user))
}

// ─── Write ────────────────────────────────────────────────────────────────────

/// `POST /users`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  payload: Result<Json<CreateUserBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: UserStore + Clone + 'static,
{
  let input = body(payload)?.validate()?;
  let user = state.users.create(input).await?;
  tracing::info!(id = %user.id, username = %user.username, "user created");
  Ok((StatusCode::CREATED, Json(user)))
}

/// `PATCH /users/id/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(raw): Path<String>,
  payload: Result<Json<UpdateUserBody>, JsonRejection>,
) -> Result<Json<User>, ApiError>
where
  S: UserStore + Clone + 'static,
{
  let id = parse_id(&raw)?;
  let patch = body(payload)?.validate()?;
  let user = state
    .users
    .update(id, patch)
    .await
    .map_err(not_found(|| format!("user with id '{id}' not found")))?;
  Ok(Json(user))
}

/// `DELETE /users/id/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(raw): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: UserStore + Clone + 'static,
{
  let id = parse_id(&raw)?;
  match absorb_missing(state.users.delete(id).await)? {
    DeleteOutcome::Deleted => tracing::info!(%id, "user deleted"),
    DeleteOutcome::AlreadyAbsent => {
      tracing::info!(%id, "delete of absent user treated as success")
    }
  }
  Ok(StatusCode::NO_CONTENT)
}
