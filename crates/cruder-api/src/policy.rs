//! Boundary-level policy for idempotent deletes.
//!
//! The store reports whether a row was actually removed. The caller's goal
//! ("make sure this id is gone") is met either way, so both outcomes become
//! success here while staying distinguishable for logging.

use cruder_core::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
  Deleted,
  AlreadyAbsent,
}

/// Absorb `NotFound` from a delete into [`DeleteOutcome::AlreadyAbsent`].
/// Every other error passes through.
pub fn absorb_missing(result: Result<()>) -> Result<DeleteOutcome> {
  match result {
    Ok(()) => Ok(DeleteOutcome::Deleted),
    Err(Error::NotFound) => Ok(DeleteOutcome::AlreadyAbsent),
    Err(e) => Err(e),
  }
}
