use std::sync::Arc;

use super::entities::User;
use super::errors::AuthError;
use super::ports::{PasswordHasher, UserRepository};
use super::value_objects::{Password, PasswordHash, Username};

/// Authentication service for HTTP Basic credentials
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
  pub fn new(user_repo: Arc<dyn UserRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
    Self {
      user_repo,
      password_hasher,
    }
  }

  /// Registers a new user with a hashed password
  ///
  /// # Errors
  /// Returns `AuthError::UsernameAlreadyExists` if the username is taken
  pub async fn register(&self, username: Username, password: Password) -> Result<User, AuthError> {
    if self
      .user_repo
      .find_by_username(username.as_str())
      .await?
      .is_some()
    {
      return Err(AuthError::UsernameAlreadyExists(username.to_string()));
    }

    let password_hash = self.password_hasher.hash(&password).await?;
    let user = self.user_repo.create(&username, &password_hash).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
  }

  /// Checks a username/password pair against the stored hash.
  ///
  /// Unknown users and wrong passwords both yield `InvalidCredentials`.
  pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
    let password = Password::new(password).map_err(|_| AuthError::InvalidCredentials)?;

    let user = self
      .user_repo
      .find_by_username(username)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    let password_hash = PasswordHash::from_hash(user.password_hash.as_str())?;
    if !self
      .password_hasher
      .verify(&password, &password_hash)
      .await?
    {
      return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::errors::RepositoryError;
  use crate::infrastructure::security::Argon2PasswordHasher;
  use async_trait::async_trait;
  use chrono::Utc;
  use std::sync::Mutex;

  #[derive(Default)]
  struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
  }

  #[async_trait]
  impl UserRepository for InMemoryUserRepository {
    async fn create(
      &self,
      username: &Username,
      password_hash: &PasswordHash,
    ) -> Result<User, RepositoryError> {
      let mut users = self.users.lock().unwrap();
      let user = User {
        id: users.len() as i64 + 1,
        username: username.to_string(),
        password_hash: password_hash.as_str().to_string(),
        created_at: Utc::now(),
      };
      users.push(user.clone());
      Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
      let users = self.users.lock().unwrap();
      Ok(users.iter().find(|u| u.username == username).cloned())
    }
  }

  fn service() -> AuthService {
    AuthService::new(
      Arc::new(InMemoryUserRepository::default()),
      Arc::new(Argon2PasswordHasher::new().unwrap()),
    )
  }

  async fn register(service: &AuthService, username: &str, password: &str) -> User {
    service
      .register(
        Username::new(username).unwrap(),
        Password::new(password).unwrap(),
      )
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn test_register_hashes_password() {
    let service = service();
    let user = register(&service, "admin", "s3cret").await;

    assert_eq!(user.username, "admin");
    assert_ne!(user.password_hash, "s3cret");
    assert!(user.password_hash.starts_with("$argon2id$"));
  }

  #[tokio::test]
  async fn test_register_rejects_duplicate_username() {
    let service = service();
    register(&service, "admin", "s3cret").await;

    let result = service
      .register(
        Username::new("admin").unwrap(),
        Password::new("other").unwrap(),
      )
      .await;
    assert!(matches!(result, Err(AuthError::UsernameAlreadyExists(name)) if name == "admin"));
  }

  #[tokio::test]
  async fn test_authenticate() {
    let service = service();
    let registered = register(&service, "admin", "s3cret").await;

    let user = service.authenticate("admin", "s3cret").await.unwrap();
    assert_eq!(user.id, registered.id);

    assert!(matches!(
      service.authenticate("admin", "wrong").await,
      Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
      service.authenticate("nobody", "s3cret").await,
      Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
      service.authenticate("admin", "").await,
      Err(AuthError::InvalidCredentials)
    ));
  }
}
