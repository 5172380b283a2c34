use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Password, Username};

/// Command for creating an API account from the command line
#[derive(Debug, Clone)]
pub struct AddUserCommand {
  pub username: String,
  pub password: String,
}

#[derive(Debug, Clone)]
pub struct AddUserResponse {
  pub user_id: i64,
  pub username: String,
}

pub struct AddUserUseCase {
  auth_service: Arc<AuthService>,
}

impl AddUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// Returns `AuthError::ValueObject` for a malformed username or password and
  /// `AuthError::UsernameAlreadyExists` when the name is taken
  pub async fn execute(&self, command: AddUserCommand) -> Result<AddUserResponse, AuthError> {
    let username = Username::new(command.username)?;
    let password = Password::new(command.password)?;

    let user = self.auth_service.register(username, password).await?;

    Ok(AddUserResponse {
      user_id: user.id,
      username: user.username,
    })
  }
}
