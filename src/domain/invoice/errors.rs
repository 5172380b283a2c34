use thiserror::Error;

use crate::domain::errors::RepositoryError;

/// Errors raised while listing or rendering invoice documents
#[derive(Debug, Error)]
pub enum DocumentError {
  #[error("Invalid template name: {0}")]
  InvalidTemplateName(String),

  #[error("Template not found: {0}")]
  TemplateNotFound(String),

  #[error("Template rendering failed: {0}")]
  Render(String),

  #[error("Template storage error: {0}")]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Repository(#[from] RepositoryError),
}
