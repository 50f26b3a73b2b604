//! The closed set of domain errors shared by every layer.
//!
//! Storage backends translate their driver failures into one of these
//! variants; nothing above the store ever sees a raw driver error. The
//! underlying cause stays reachable through [`std::error::Error::source`] for
//! logging but is never part of the `Display` output.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("user not found")]
  NotFound,

  #[error("username already exists")]
  UsernameConflict(#[source] BoxError),

  #[error("email already exists")]
  EmailConflict(#[source] BoxError),

  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// Any persistence failure the store could not classify.
  #[error("storage failure")]
  Storage(#[source] BoxError),
}

impl Error {
  /// Wrap an arbitrary storage-layer error as [`Error::Storage`].
  pub fn storage(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(e))
  }

  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
