//! Request bodies and their format rules.
//!
//! Format checks (presence, length, character class, email shape) live here
//! at the boundary. The full-name character rule is a business rule and is
//! enforced by [`cruder_core::service::UserService`] instead.

use std::collections::BTreeMap;

use cruder_core::user::{NewUser, UserField, UserPatch};
use serde::Deserialize;

use crate::error::ApiError;

const REQUIRED: &str = "This field is required";

/// Body of `POST /users`. Every field is required; they are optional here
/// only so a missing key can be reported per field.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserBody {
  pub username:  Option<String>,
  pub email:     Option<String>,
  pub full_name: Option<String>,
}

/// Body of `PATCH /users/id/{id}`. Omitted (or `null`) keys are not written.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserBody {
  pub username:  Option<String>,
  pub email:     Option<String>,
  pub full_name: Option<String>,
}

/// Collected per-field failures, keyed by JSON field name.
#[derive(Default)]
struct Violations(BTreeMap<&'static str, String>);

impl Violations {
  fn check(&mut self, field: UserField, value: &str) {
    if let Some(msg) = format_violation(field, value) {
      self.0.insert(field.as_str(), msg);
    }
  }

  /// Check a required field, returning its value (empty when missing).
  fn require(&mut self, field: UserField, value: Option<String>) -> String {
    match value {
      Some(v) => {
        self.check(field, &v);
        v
      }
      None => {
        self.0.insert(field.as_str(), REQUIRED.to_owned());
        String::new()
      }
    }
  }

  fn finish(self) -> Result<(), ApiError> {
    if self.0.is_empty() { Ok(()) } else { Err(ApiError::Validation(self.0)) }
  }
}

fn length_violation(value: &str, min: usize, max: usize) -> Option<String> {
  let len = value.chars().count();
  if len < min {
    Some(format!("Value is too short (minimum {min} characters)"))
  } else if len > max {
    Some(format!("Value is too long (maximum {max} characters)"))
  } else {
    None
  }
}

/// A deliberately loose address check: one `@`, a non-empty local part, and
/// a dotted domain without empty labels or whitespace.
fn is_email(value: &str) -> bool {
  let Some((local, domain)) = value.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.contains('@')
    && !value.chars().any(char::is_whitespace)
    && domain.contains('.')
    && domain.split('.').all(|label| !label.is_empty())
}

fn format_violation(field: UserField, value: &str) -> Option<String> {
  match field {
    UserField::Username => length_violation(value, 3, 50).or_else(|| {
      (!value.chars().all(|c| c.is_ascii_alphanumeric()))
        .then(|| "Must contain only alphanumeric characters".to_owned())
    }),
    UserField::Email => (!is_email(value))
      .then(|| "Invalid email format".to_owned())
      .or_else(|| length_violation(value, 0, 100)),
    UserField::FullName => length_violation(value, 2, 100),
  }
}

impl CreateUserBody {
  pub fn validate(self) -> Result<NewUser, ApiError> {
    let mut v = Violations::default();
    let username = v.require(UserField::Username, self.username);
    let email = v.require(UserField::Email, self.email);
    let full_name = v.require(UserField::FullName, self.full_name);
    v.finish()?;
    Ok(NewUser { username, email, full_name })
  }
}

impl UpdateUserBody {
  pub fn validate(self) -> Result<UserPatch, ApiError> {
    let patch = UserPatch {
      username:  self.username,
      email:     self.email,
      full_name: self.full_name,
    };
    let mut v = Violations::default();
    for (field, value) in patch.present() {
      v.check(field, value);
    }
    v.finish()?;
    Ok(patch)
  }
}
