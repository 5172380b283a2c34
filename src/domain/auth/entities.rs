use chrono::{DateTime, Utc};

/// Account allowed to use the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  pub id: i64,
  pub username: String,
  /// Argon2id PHC string
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}
