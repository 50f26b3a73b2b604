//! Errors raised while turning stored rows back into domain types.
//!
//! These never escape the crate on their own; they are wrapped as
//! [`cruder_core::Error::Storage`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(#[from] chrono::ParseError),
}

impl From<DecodeError> for cruder_core::Error {
  fn from(e: DecodeError) -> Self { cruder_core::Error::storage(e) }
}
