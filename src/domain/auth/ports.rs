use async_trait::async_trait;

use super::entities::User;
use super::errors::AuthError;
use super::value_objects::{Password, PasswordHash, Username};
use crate::domain::errors::RepositoryError;

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Stores a new user, failing with a validation error when the username is taken
  async fn create(
    &self,
    username: &Username,
    password_hash: &PasswordHash,
  ) -> Result<User, RepositoryError>;

  async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a stored hash
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}
