//! Input normalisation and the one business rule enforced above storage.
//!
//! Usernames and emails compare case-insensitively, so both are trimmed and
//! lower-cased before they reach a store. Every function here is idempotent.

use crate::{
  Error, Result,
  user::{NewUser, UserPatch},
};

/// Trim surrounding whitespace and lower-case. Used for username and email.
pub fn normalize_identity(raw: &str) -> String { raw.trim().to_lowercase() }

/// Trim surrounding whitespace. Used for the full name.
pub fn normalize_label(raw: &str) -> String { raw.trim().to_owned() }

/// A full name may contain only letters, whitespace, hyphens and apostrophes.
pub fn validate_full_name(full_name: &str) -> Result<()> {
  let allowed = |c: char| {
    c.is_ascii_alphabetic() || c.is_ascii_whitespace() || matches!(c, '-' | '\'')
  };
  if full_name.is_empty() || !full_name.chars().all(allowed) {
    return Err(Error::InvalidInput(
      "full name must contain only letters, spaces, hyphens, and apostrophes"
        .to_owned(),
    ));
  }
  Ok(())
}

impl NewUser {
  pub fn normalized(self) -> Self {
    NewUser {
      username:  normalize_identity(&self.username),
      email:     normalize_identity(&self.email),
      full_name: normalize_label(&self.full_name),
    }
  }
}

impl UserPatch {
  /// Normalise the fields that are present; absent fields stay absent.
  pub fn normalized(self) -> Self {
    UserPatch {
      username:  self.username.as_deref().map(normalize_identity),
      email:     self.email.as_deref().map(normalize_identity),
      full_name: self.full_name.as_deref().map(normalize_label),
    }
  }
}
