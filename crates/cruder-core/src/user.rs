//! The user record and the request shapes that create and mutate it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted user. Either fully present or absent; there is no tombstone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:         Uuid,
  pub username:   String,
  pub email:      String,
  pub full_name:  String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input for creating a user. Identity and timestamps are assigned by the
/// store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
  pub username:  String,
  pub email:     String,
  pub full_name: String,
}

// ─── Sparse updates ──────────────────────────────────────────────────────────

/// The mutable columns of a user, in the order they are always written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
  Username,
  Email,
  FullName,
}

impl UserField {
  /// Every mutable field in its fixed write order.
  pub const ALL: [UserField; 3] =
    [UserField::Username, UserField::Email, UserField::FullName];

  pub fn as_str(self) -> &'static str {
    match self {
      UserField::Username => "username",
      UserField::Email => "email",
      UserField::FullName => "full_name",
    }
  }
}

/// A sparse update: only fields that are `Some` are written.
///
/// A patch with no fields set is valid and means "return the current record".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
  pub username:  Option<String>,
  pub email:     Option<String>,
  pub full_name: Option<String>,
}

impl UserPatch {
  pub fn is_empty(&self) -> bool {
    self.username.is_none() && self.email.is_none() && self.full_name.is_none()
  }

  pub fn get(&self, field: UserField) -> Option<&str> {
    match field {
      UserField::Username => self.username.as_deref(),
      UserField::Email => self.email.as_deref(),
      UserField::FullName => self.full_name.as_deref(),
    }
  }

  pub fn set(&mut self, field: UserField, value: impl Into<String>) {
    let slot = match field {
      UserField::Username => &mut self.username,
      UserField::Email => &mut self.email,
      UserField::FullName => &mut self.full_name,
    };
    *slot = Some(value.into());
  }

  /// Present fields in [`UserField::ALL`] order.
  pub fn present(&self) -> impl Iterator<Item = (UserField, &str)> + '_ {
    UserField::ALL
      .into_iter()
      .filter_map(|f| self.get(f).map(|v| (f, v)))
  }
}

impl<V: Into<String>> FromIterator<(UserField, V)> for UserPatch {
  fn from_iter<I: IntoIterator<Item = (UserField, V)>>(iter: I) -> Self {
    let mut patch = UserPatch::default();
    for (field, value) in iter {
      patch.set(field, value);
    }
    patch
  }
}
