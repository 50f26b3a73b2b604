//! Construction of the single `UPDATE` statement behind a sparse patch.

use chrono::{DateTime, Utc};
use cruder_core::user::{UserField, UserPatch};
use uuid::Uuid;

use crate::encode::{USER_COLUMNS, encode_dt, encode_uuid};

/// A parameterised `UPDATE ... RETURNING` and its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatement {
  pub sql:  String,
  pub args: Vec<String>,
}

impl UpdateStatement {
  /// Build the statement for `patch`, or `None` if the patch is empty.
  ///
  /// Assignments follow [`UserField::ALL`] order, then `updated_at`, and the
  /// id is always the last parameter. `updated_at` never moves backwards,
  /// even if the clock does: the stored value wins when it is later than
  /// `now`. Timestamps are fixed-width text, so `MAX` compares them in time
  /// order.
  pub fn build(id: Uuid, patch: &UserPatch, now: DateTime<Utc>) -> Option<Self> {
    if patch.is_empty() {
      return None;
    }

    let mut sets = Vec::with_capacity(UserField::ALL.len() + 1);
    let mut args = Vec::with_capacity(UserField::ALL.len() + 2);

    for (field, value) in patch.present() {
      args.push(value.to_owned());
      sets.push(format!("{} = ?{}", field.as_str(), args.len()));
    }

    args.push(encode_dt(now));
    sets.push(format!("updated_at = MAX(?{}, updated_at)", args.len()));

    args.push(encode_uuid(id));
    let sql = format!(
      "UPDATE users SET {} WHERE id = ?{} RETURNING {USER_COLUMNS}",
      sets.join(", "),
      args.len(),
    );

    Some(UpdateStatement { sql, args })
  }
}
