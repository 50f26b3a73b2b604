//! [`SqliteStore`] — the SQLite implementation of [`UserStore`].

use std::path::Path;

use chrono::Utc;
use cruder_core::{
  Error, Result,
  store::UserStore,
  user::{NewUser, User, UserPatch},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  classify::classify,
  encode::{RawUser, USER_COLUMNS, encode_dt, encode_uuid},
  query::UpdateStatement,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A user store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All clones
/// funnel through one connection, so each statement is atomic on its own and
/// the UNIQUE constraints decide races between concurrent writers.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(Error::storage)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(Error::storage)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(Error::storage)
  }

  /// Fetch one row by an arbitrary key column.
  async fn fetch_one(&self, key: &'static str, value: String) -> Result<User> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {key} = ?1");

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![value], RawUser::from_row)
            .optional()?,
        )
      })
      .await
      .map_err(Error::storage)?;

    Ok(raw.ok_or(Error::NotFound)?.into_user()?)
  }

  /// Number of rows changed since the connection was opened.
  #[cfg(test)]
  pub(crate) async fn total_changes(&self) -> i64 {
    self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT total_changes()", [], |r| r.get(0))?))
      .await
      .expect("total_changes")
  }

  /// Overwrite both timestamps of a row, bypassing the update path.
  #[cfg(test)]
  pub(crate) async fn set_timestamps(&self, id: Uuid, at: chrono::DateTime<Utc>) {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(at);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET created_at = ?1, updated_at = ?1 WHERE id = ?2",
          rusqlite::params![at_str, id_str],
        )?;
        Ok(())
      })
      .await
      .expect("set_timestamps")
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for SqliteStore {
  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
        ))?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::storage)?;

    raws
      .into_iter()
      .map(|raw| raw.into_user().map_err(Error::from))
      .collect()
  }

  async fn get_user(&self, id: Uuid) -> Result<User> {
    self.fetch_one("id", encode_uuid(id)).await
  }

  async fn get_user_by_username(&self, username: &str) -> Result<User> {
    self.fetch_one("username", username.to_owned()).await
  }

  async fn create_user(&self, input: NewUser) -> Result<User> {
    let now = Utc::now();
    let user = User {
      id:         Uuid::new_v4(),
      username:   input.username,
      email:      input.email,
      full_name:  input.full_name,
      created_at: now,
      updated_at: now,
    };

    let id_str    = encode_uuid(user.id);
    let username  = user.username.clone();
    let email     = user.email.clone();
    let full_name = user.full_name.clone();
    let at_str    = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (id, username, email, full_name, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![id_str, username, email, full_name, at_str],
        )?;
        Ok(())
      })
      .await
      .map_err(classify)?;

    Ok(user)
  }

  async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User> {
    // Nothing to write: an empty patch is a plain read.
    let Some(stmt) = UpdateStatement::build(id, &patch, Utc::now()) else {
      return self.get_user(id).await;
    };

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &stmt.sql,
              rusqlite::params_from_iter(stmt.args.iter()),
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(classify)?;

    Ok(raw.ok_or(Error::NotFound)?.into_user()?)
  }

  async fn delete_user(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM users WHERE id = ?1", rusqlite::params![id_str])?)
      })
      .await
      .map_err(Error::storage)?;

    if affected == 0 {
      return Err(Error::NotFound);
    }
    Ok(())
  }

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await
      .map_err(Error::storage)
  }
}
