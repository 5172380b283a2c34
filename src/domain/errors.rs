use thiserror::Error;

/// Persistence errors shared by every record repository
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("{entity} {id} not found")]
  NotFound { entity: &'static str, id: i64 },

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Cannot delete {entity} {id}: {reason}")]
  Restricted {
    entity: &'static str,
    id: i64,
    reason: String,
  },

  #[error("Invalid stored data: {0}")]
  InvalidData(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

impl RepositoryError {
  pub fn not_found(entity: &'static str, id: i64) -> Self {
    RepositoryError::NotFound { entity, id }
  }

  pub fn restricted(entity: &'static str, id: i64, reason: impl Into<String>) -> Self {
    RepositoryError::Restricted {
      entity,
      id,
      reason: reason.into(),
    }
  }
}
