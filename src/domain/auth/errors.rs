use thiserror::Error;

use super::value_objects::ValueObjectError;
use crate::domain::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Invalid credentials provided")]
  InvalidCredentials,

  #[error("Username already exists: {0}")]
  UsernameAlreadyExists(String),

  #[error("Hash error: {0}")]
  Hash(String),

  #[error("Validation error: {0}")]
  ValueObject(#[from] ValueObjectError),

  #[error(transparent)]
  Repository(#[from] RepositoryError),
}
