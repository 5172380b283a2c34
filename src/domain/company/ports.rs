use async_trait::async_trait;

use super::entities::{Company, CompanyData};
use crate::domain::errors::RepositoryError;

#[async_trait]
pub trait CompanyRepository: Send + Sync {
  async fn create(&self, data: CompanyData) -> Result<Company, RepositoryError>;

  /// Replaces every field; returns `None` when the company does not exist
  async fn update(&self, id: i64, data: CompanyData) -> Result<Option<Company>, RepositoryError>;

  async fn find_by_id(&self, id: i64) -> Result<Option<Company>, RepositoryError>;

  async fn find_all(&self) -> Result<Vec<Company>, RepositoryError>;

  /// Fails with `Restricted` while any invoice references the company.
  /// Returns `false` when nothing was deleted.
  async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}
