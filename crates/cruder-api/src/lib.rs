//! JSON REST API for cruder.
//!
//! Exposes an axum [`Router`] backed by any [`UserStore`], wrapped in a
//! [`UserService`]. TLS and transport concerns are the caller's
//! responsibility.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod policy;
pub mod request;
pub mod users;

use std::sync::Arc;

use axum::{Router, routing::get};
use cruder_core::{service::UserService, store::UserStore};
use tower_http::{
  catch_panic::CatchPanicLayer,
  request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
  trace::TraceLayer,
};

pub use self::config::ServerConfig;
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub users: UserService<S>,
}

impl<S: UserStore> AppState<S> {
  pub fn new(store: S) -> Self {
    Self { users: UserService::new(Arc::new(store)) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

fn users_router<S>() -> Router<AppState<S>>
where
  S: UserStore + Clone + 'static,
{
  Router::new()
    .route("/users", get(users::list::<S>).post(users::create::<S>))
    .route("/users/username/{username}", get(users::get_by_username::<S>))
    .route(
      "/users/id/{id}",
      get(users::get_by_id::<S>)
        .patch(users::update::<S>)
        .delete(users::delete::<S>),
    )
}

/// Build the full application router: probes at the root, the user API
/// under `/api/v1`.
///
/// Layers, outermost first: request-id assignment, the request span,
/// request-id echo on the response, panic recovery.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: UserStore + Clone + 'static,
{
  Router::new()
    .route("/health", get(health::liveness))
    .route("/ready", get(health::readiness::<S>))
    .nest("/api/v1", users_router::<S>())
    .layer(CatchPanicLayer::custom(middleware::panic_response))
    .layer(PropagateRequestIdLayer::x_request_id())
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(middleware::request_span)
        .on_response(middleware::log_response)
        .on_failure(()),
    )
    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    .with_state(state)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
