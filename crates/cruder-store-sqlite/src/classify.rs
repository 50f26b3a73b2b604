//! Translation of driver failures into the domain error taxonomy.
//!
//! SQLite reports a unique violation as extended code
//! `SQLITE_CONSTRAINT_UNIQUE` with a message of the form
//! `UNIQUE constraint failed: users.<column>`. The extended code is checked
//! first; the message is only consulted to tell the two unique columns apart.
//! Anything unrecognised degrades to [`Error::Storage`].

use cruder_core::Error;
use rusqlite::ffi;

/// Which unique column a violation refers to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Violation {
  Username,
  Email,
}

fn violated_column(err: &tokio_rusqlite::Error) -> Option<Violation> {
  let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(code, msg)) = err
  else {
    return None;
  };
  if code.extended_code != ffi::SQLITE_CONSTRAINT_UNIQUE {
    return None;
  }
  let msg = msg.as_deref()?;
  if msg.contains("users.username") {
    Some(Violation::Username)
  } else if msg.contains("users.email") {
    Some(Violation::Email)
  } else {
    None
  }
}

/// Classify an error returned by a write against the `users` table.
pub fn classify(err: tokio_rusqlite::Error) -> Error {
  match violated_column(&err) {
    Some(Violation::Username) => Error::UsernameConflict(Box::new(err)),
    Some(Violation::Email) => Error::EmailConflict(Box::new(err)),
    None => {
      tracing::debug!(error = %err, "unclassified storage error");
      Error::storage(err)
    }
  }
}
