use std::sync::Arc;

use super::{
  entities::{Company, CompanyData},
  ports::CompanyRepository,
};
use crate::domain::errors::RepositoryError;

const ENTITY: &str = "Company";
const MAX_DOCUMENT_LENGTH: usize = 30;

/// Company record operations
pub struct CompanyService {
  company_repo: Arc<dyn CompanyRepository>,
}

impl CompanyService {
  pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
    Self { company_repo }
  }

  pub async fn list_companies(&self) -> Result<Vec<Company>, RepositoryError> {
    self.company_repo.find_all().await
  }

  pub async fn get_company(&self, id: i64) -> Result<Company, RepositoryError> {
    self
      .company_repo
      .find_by_id(id)
      .await?
      .ok_or(RepositoryError::not_found(ENTITY, id))
  }

  pub async fn create_company(&self, data: CompanyData) -> Result<Company, RepositoryError> {
    ensure_valid_fields(&data)?;
    let company = self.company_repo.create(data).await?;
    tracing::info!(company_id = company.id, "Company created");
    Ok(company)
  }

  pub async fn update_company(
    &self,
    id: i64,
    data: CompanyData,
  ) -> Result<Company, RepositoryError> {
    ensure_valid_fields(&data)?;
    self
      .company_repo
      .update(id, data)
      .await?
      .ok_or(RepositoryError::not_found(ENTITY, id))
  }

  pub async fn delete_company(&self, id: i64) -> Result<(), RepositoryError> {
    if !self.company_repo.delete(id).await? {
      return Err(RepositoryError::not_found(ENTITY, id));
    }
    tracing::info!(company_id = id, "Company deleted");
    Ok(())
  }
}

/// Name, document and address are required; the document fits 30 characters
fn ensure_valid_fields(data: &CompanyData) -> Result<(), RepositoryError> {
  for (field, value) in [
    ("Name", &data.name),
    ("Document", &data.document),
    ("Address", &data.address),
  ] {
    if value.trim().is_empty() {
      return Err(RepositoryError::Validation(format!("{} is required", field)));
    }
  }
  if data.document.chars().count() > MAX_DOCUMENT_LENGTH {
    return Err(RepositoryError::Validation(format!(
      "Document must be at most {} characters",
      MAX_DOCUMENT_LENGTH
    )));
  }
  Ok(())
}
