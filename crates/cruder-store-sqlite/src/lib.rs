//! SQLite backend for the cruder user store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every driver failure leaves this crate
//! as a [`cruder_core::Error`].

mod classify;
mod encode;
mod query;
mod schema;
mod store;

pub mod error;

pub use error::DecodeError;
pub use store::SqliteStore;
