use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::auth::{PasswordHash, User, UserRepository, Username};
use crate::domain::errors::RepositoryError;

/// SQLite implementation of the UserRepository trait
pub struct SqliteUserRepository {
  pool: SqlitePool,
}

impl SqliteUserRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: i64,
  username: String,
  password_hash: String,
  created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User {
      id: row.id,
      username: row.username,
      password_hash: row.password_hash,
      created_at: row.created_at,
    }
  }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
  async fn create(
    &self,
    username: &Username,
    password_hash: &PasswordHash,
  ) -> Result<User, RepositoryError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, username, password_hash, created_at
            "#,
    )
    .bind(username.as_str())
    .bind(password_hash.as_str())
    .bind(Utc::now())
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => Ok(row.into()),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
        RepositoryError::Validation(format!("Username {} already exists", username)),
      ),
      Err(e) => Err(e.into()),
    }
  }

  async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
    let row = sqlx::query_as::<_, UserRow>(
      "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
    )
    .bind(username)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }
}
