use argon2::PasswordHash as Argon2PasswordHash;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Username is required")]
  UsernameEmpty,

  #[error("Username is too long (maximum 64 characters)")]
  UsernameTooLong,

  #[error("Username must not contain ':' or whitespace")]
  UsernameInvalidCharacter,

  #[error("Password is required")]
  PasswordEmpty,

  #[error("Password is too long (maximum 128 characters)")]
  PasswordTooLong,

  #[error("Invalid password hash format")]
  InvalidPasswordHash,
}

// ============================================================================
// Username Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
  const MAX_LENGTH: usize = 64;

  /// The Basic scheme splits credentials on the first ':', so it can not
  /// appear in a username.
  pub fn new(username: impl Into<String>) -> Result<Self, ValueObjectError> {
    let username = username.into();

    if username.is_empty() {
      return Err(ValueObjectError::UsernameEmpty);
    }
    if username.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::UsernameTooLong);
    }
    if username.chars().any(|c| c == ':' || c.is_whitespace()) {
      return Err(ValueObjectError::UsernameInvalidCharacter);
    }

    Ok(Self(username))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Username {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain password, wiped from memory on drop
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
  const MAX_LENGTH: usize = 128;

  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = Zeroizing::new(password.into());

    if password.is_empty() {
      return Err(ValueObjectError::PasswordEmpty);
    }
    if password.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// PasswordHash Value Object (PHC string)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}
