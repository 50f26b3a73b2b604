//! The `UserStore` trait — the repository seam between the service and a
//! storage backend.
//!
//! Implementations report facts, never policy: a delete that matches no row
//! is [`Error::NotFound`](crate::Error::NotFound) even though the HTTP layer
//! chooses to treat it as success.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  user::{NewUser, User, UserPatch},
};

/// Abstraction over a user storage backend.
///
/// Every method is a single round trip to storage. Uniqueness of `username`
/// and `email` is enforced by the backend's constraints, not by locking, and
/// every failure is already translated into the domain
/// [`Error`](crate::Error) taxonomy.
pub trait UserStore: Send + Sync {
  /// All users, oldest first.
  fn list_users(&self) -> impl Future<Output = Result<Vec<User>>> + Send + '_;

  /// Fetch a user by id. A missing row is `NotFound`, never an empty success.
  fn get_user(&self, id: Uuid) -> impl Future<Output = Result<User>> + Send + '_;

  /// Fetch a user by (already normalised) username.
  fn get_user_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<User>> + Send + 'a;

  /// Insert a user. The store assigns the id and both timestamps.
  ///
  /// Fails with `UsernameConflict` or `EmailConflict` when a unique
  /// constraint rejects the row.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User>> + Send + '_;

  /// Apply a sparse update and return the resulting record.
  ///
  /// An empty patch performs no write and behaves exactly like
  /// [`get_user`](Self::get_user).
  fn update_user(
    &self,
    id: Uuid,
    patch: UserPatch,
  ) -> impl Future<Output = Result<User>> + Send + '_;

  /// Hard-delete a user. Zero affected rows is `NotFound`.
  fn delete_user(&self, id: Uuid) -> impl Future<Output = Result<()>> + Send + '_;

  /// Cheap liveness check against the backend, used by readiness probes.
  fn ping(&self) -> impl Future<Output = Result<()>> + Send + '_;
}
