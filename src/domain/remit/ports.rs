use async_trait::async_trait;

use super::entities::{RemitInformation, RemitInformationData};
use crate::domain::errors::RepositoryError;

/// Remit information is stored together with its lines; every read returns them
#[async_trait]
pub trait RemitInformationRepository: Send + Sync {
  async fn create(&self, data: RemitInformationData) -> Result<RemitInformation, RepositoryError>;

  /// Replaces the name and the whole line set atomically
  async fn update(
    &self,
    id: i64,
    data: RemitInformationData,
  ) -> Result<Option<RemitInformation>, RepositoryError>;

  async fn find_by_id(&self, id: i64) -> Result<Option<RemitInformation>, RepositoryError>;
  async fn find_all(&self) -> Result<Vec<RemitInformation>, RepositoryError>;

  /// Removes the lines, then the parent, in one transaction.
  /// Fails with `Restricted` while an invoice references it.
  async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}
