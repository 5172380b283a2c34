use std::sync::Arc;

use super::{
  entities::{RemitInformation, RemitInformationData},
  ports::RemitInformationRepository,
};
use crate::domain::errors::RepositoryError;

const ENTITY: &str = "RemitInformation";

pub struct RemitInformationService {
  remit_repo: Arc<dyn RemitInformationRepository>,
}

impl RemitInformationService {
  pub fn new(remit_repo: Arc<dyn RemitInformationRepository>) -> Self {
    Self { remit_repo }
  }

  pub async fn list_remit_informations(&self) -> Result<Vec<RemitInformation>, RepositoryError> {
    self.remit_repo.find_all().await
  }

  pub async fn get_remit_information(&self, id: i64) -> Result<RemitInformation, RepositoryError> {
    self
      .remit_repo
      .find_by_id(id)
      .await?
      .ok_or(RepositoryError::not_found(ENTITY, id))
  }

  pub async fn create_remit_information(
    &self,
    data: RemitInformationData,
  ) -> Result<RemitInformation, RepositoryError> {
    let remit = self.remit_repo.create(data).await?;
    tracing::info!(
      remit_information_id = remit.id,
      lines = remit.lines.len(),
      "Remit information created"
    );
    Ok(remit)
  }

  pub async fn update_remit_information(
    &self,
    id: i64,
    data: RemitInformationData,
  ) -> Result<RemitInformation, RepositoryError> {
    self
      .remit_repo
      .update(id, data)
      .await?
      .ok_or(RepositoryError::not_found(ENTITY, id))
  }

  pub async fn delete_remit_information(&self, id: i64) -> Result<(), RepositoryError> {
    if !self.remit_repo.delete(id).await? {
      return Err(RepositoryError::not_found(ENTITY, id));
    }
    tracing::info!(remit_information_id = id, "Remit information deleted");
    Ok(())
  }
}
