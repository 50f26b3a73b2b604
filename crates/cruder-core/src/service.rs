//! [`UserService`] — normalisation and validation in front of a [`UserStore`].
//!
//! Store errors pass through untouched; the service never reclassifies them.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Result,
  normalize::{normalize_identity, validate_full_name},
  store::UserStore,
  user::{NewUser, User, UserPatch},
};

/// Business-logic layer over a shared store handle.
///
/// Cloning is cheap; all clones share the same store.
pub struct UserService<S> {
  store: Arc<S>,
}

impl<S> Clone for UserService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: UserStore> UserService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn list(&self) -> Result<Vec<User>> { self.store.list_users().await }

  /// Usernames are case-insensitive: the lookup key is normalised first.
  pub async fn get_by_username(&self, username: &str) -> Result<User> {
    let username = normalize_identity(username);
    self.store.get_user_by_username(&username).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
    self.store.get_user(id).await
  }

  /// Normalise, validate the full name, then insert. An invalid full name is
  /// rejected without touching the store.
  pub async fn create(&self, input: NewUser) -> Result<User> {
    let input = input.normalized();
    validate_full_name(&input.full_name)?;
    self.store.create_user(input).await
  }

  /// Normalise the present fields and validate the full name only if it is
  /// part of the patch.
  pub async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User> {
    let patch = patch.normalized();
    if let Some(full_name) = &patch.full_name {
      validate_full_name(full_name)?;
    }
    self.store.update_user(id, patch).await
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete_user(id).await
  }

  pub async fn ping(&self) -> Result<()> { self.store.ping().await }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use chrono::Utc;

  use super::*;
  use crate::{BoxError, Error};

  /// What the service asked the store to do.
  #[derive(Debug, Clone, PartialEq)]
  enum Call {
    List,
    Get(Uuid),
    GetByUsername(String),
    Create(NewUser),
    Update(Uuid, UserPatch),
    Delete(Uuid),
    Ping,
  }

  /// Scripted store: records every call and answers with a canned outcome.
  #[derive(Default)]
  struct FakeStore {
    calls: Mutex<Vec<Call>>,
    fail:  Mutex<Option<fn() -> Error>>,
  }

  impl FakeStore {
    fn failing(make: fn() -> Error) -> Self {
      FakeStore { calls: Mutex::default(), fail: Mutex::new(Some(make)) }
    }

    fn record(&self, call: Call) -> Result<()> {
      self.calls.lock().unwrap().push(call);
      match *self.fail.lock().unwrap() {
        Some(make) => Err(make()),
        None => Ok(()),
      }
    }

    fn calls(&self) -> Vec<Call> { self.calls.lock().unwrap().clone() }
  }

  fn user(username: &str, email: &str, full_name: &str) -> User {
    let now = Utc::now();
    User {
      id:         Uuid::new_v4(),
      username:   username.to_owned(),
      email:      email.to_owned(),
      full_name:  full_name.to_owned(),
      created_at: now,
      updated_at: now,
    }
  }

  impl UserStore for FakeStore {
    async fn list_users(&self) -> Result<Vec<User>> {
      self.record(Call::List)?;
      Ok(vec![user("user1", "user1@example.com", "User One")])
    }

    async fn get_user(&self, id: Uuid) -> Result<User> {
      self.record(Call::Get(id))?;
      Ok(User { id, ..user("johndoe", "john@example.com", "John Doe") })
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User> {
      self.record(Call::GetByUsername(username.to_owned()))?;
      Ok(user(username, "john@example.com", "John Doe"))
    }

    async fn create_user(&self, input: NewUser) -> Result<User> {
      self.record(Call::Create(input.clone()))?;
      Ok(user(&input.username, &input.email, &input.full_name))
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User> {
      self.record(Call::Update(id, patch))?;
      Ok(User { id, ..user("johndoe", "john@example.com", "John Doe") })
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
      self.record(Call::Delete(id))
    }

    async fn ping(&self) -> Result<()> { self.record(Call::Ping) }
  }

  fn service(store: FakeStore) -> (UserService<FakeStore>, Arc<FakeStore>) {
    let store = Arc::new(store);
    (UserService::new(Arc::clone(&store)), store)
  }

  fn new_user(username: &str, email: &str, full_name: &str) -> NewUser {
    NewUser {
      username:  username.to_owned(),
      email:     email.to_owned(),
      full_name: full_name.to_owned(),
    }
  }

  fn dup() -> BoxError { Box::new(std::io::Error::other("duplicate")) }

  // ─── Lookups ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_by_username_normalises_the_key() {
    let (svc, store) = service(FakeStore::default());
    let found = svc.get_by_username("  JohnDoe ").await.unwrap();
    assert_eq!(found.username, "johndoe");
    assert_eq!(store.calls(), [Call::GetByUsername("johndoe".into())]);
  }

  #[tokio::test]
  async fn not_found_passes_through_unchanged() {
    let (svc, _) = service(FakeStore::failing(|| Error::NotFound));
    let err = svc.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(err.is_not_found());
  }

  #[tokio::test]
  async fn storage_errors_pass_through_unchanged() {
    let (svc, _) = service(FakeStore::failing(|| {
      Error::storage(std::io::Error::other("connection reset"))
    }));
    assert!(matches!(svc.list().await, Err(Error::Storage(_))));
  }

  // ─── Create ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_normalises_before_storing() {
    let (svc, store) = service(FakeStore::default());
    svc
      .create(new_user("  TestUser  ", "  Test@Example.COM  ", "  Test User  "))
      .await
      .unwrap();

    assert_eq!(
      store.calls(),
      [Call::Create(new_user("testuser", "test@example.com", "Test User"))]
    );
  }

  #[tokio::test]
  async fn create_with_invalid_full_name_never_reaches_the_store() {
    let (svc, store) = service(FakeStore::default());
    let err = svc
      .create(new_user("john", "john@example.com", "John123"))
      .await
      .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(store.calls().is_empty());
  }

  #[tokio::test]
  async fn create_accepts_apostrophes_and_hyphens() {
    let (svc, _) = service(FakeStore::default());
    let made = svc
      .create(new_user("mj", "mj@example.com", "Mary-Jane O'Brien"))
      .await
      .unwrap();
    assert_eq!(made.full_name, "Mary-Jane O'Brien");
  }

  #[tokio::test]
  async fn create_conflicts_pass_through() {
    let (svc, _) = service(FakeStore::failing(|| Error::UsernameConflict(dup())));
    let err = svc
      .create(new_user("taken", "new@example.com", "New User"))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::UsernameConflict(_)));

    let (svc, _) = service(FakeStore::failing(|| Error::EmailConflict(dup())));
    let err = svc
      .create(new_user("fresh", "taken@example.com", "New User"))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::EmailConflict(_)));
  }

  // ─── Update ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_normalises_only_present_fields() {
    let (svc, store) = service(FakeStore::default());
    let id = Uuid::new_v4();
    let patch = UserPatch {
      username:  Some(" NewName ".into()),
      email:     None,
      full_name: Some("  New Name ".into()),
    };
    svc.update(id, patch).await.unwrap();

    assert_eq!(
      store.calls(),
      [Call::Update(id, UserPatch {
        username:  Some("newname".into()),
        email:     None,
        full_name: Some("New Name".into()),
      })]
    );
  }

  #[tokio::test]
  async fn update_with_invalid_full_name_never_reaches_the_store() {
    let (svc, store) = service(FakeStore::default());
    let patch = UserPatch { full_name: Some("R2-D2".into()), ..UserPatch::default() };
    let err = svc.update(Uuid::new_v4(), patch).await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(store.calls().is_empty());
  }

  #[tokio::test]
  async fn empty_update_is_forwarded_as_empty() {
    let (svc, store) = service(FakeStore::default());
    let id = Uuid::new_v4();
    svc.update(id, UserPatch::default()).await.unwrap();
    assert_eq!(store.calls(), [Call::Update(id, UserPatch::default())]);
  }

  // ─── Delete ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_reports_not_found_as_an_error() {
    let (svc, _) = service(FakeStore::failing(|| Error::NotFound));
    let err = svc.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(err.is_not_found());
  }

  #[tokio::test]
  async fn ping_reaches_the_store() {
    let (svc, store) = service(FakeStore::default());
    svc.ping().await.unwrap();
    assert_eq!(store.calls(), [Call::Ping]);
  }
}
