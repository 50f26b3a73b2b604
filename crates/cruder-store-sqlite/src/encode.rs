//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings with nanosecond
//! precision, so text order equals time order and a round trip is lossless.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use cruder_core::user::User;
use uuid::Uuid;

use crate::error::DecodeError;

/// Column list shared by every statement that reads a whole user row.
pub const USER_COLUMNS: &str =
  "id, username, email, full_name, created_at, updated_at";

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid, DecodeError> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>, DecodeError> {
  Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

// ─── Row type ─────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub id:         String,
  pub username:   String,
  pub email:      String,
  pub full_name:  String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawUser {
  /// Read a row selected with [`USER_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawUser {
      id:         row.get(0)?,
      username:   row.get(1)?,
      email:      row.get(2)?,
      full_name:  row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User, DecodeError> {
    Ok(User {
      id:         decode_uuid(&self.id)?,
      username:   self.username,
      email:      self.email,
      full_name:  self.full_name,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
