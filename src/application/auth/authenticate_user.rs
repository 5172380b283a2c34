use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Credentials decoded from an `Authorization: Basic` header
#[derive(Clone)]
pub struct AuthenticateUserCommand {
  pub username: String,
  pub password: String,
}

impl std::fmt::Debug for AuthenticateUserCommand {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AuthenticateUserCommand")
      .field("username", &self.username)
      .field("password", &"***")
      .finish()
  }
}

pub struct AuthenticateUserUseCase {
  auth_service: Arc<AuthService>,
}

impl AuthenticateUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: AuthenticateUserCommand) -> Result<User, AuthError> {
    self
      .auth_service
      .authenticate(&command.username, &command.password)
      .await
  }
}
