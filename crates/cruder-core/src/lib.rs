//! Core types and trait definitions for the cruder user service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::UserStore`]; the HTTP layer talks to
//! them only through [`service::UserService`].

pub mod error;
pub mod normalize;
pub mod service;
pub mod store;
pub mod user;

pub use error::{BoxError, Error, Result};
