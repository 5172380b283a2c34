use std::sync::Arc;

use super::entities::{Invoice, InvoiceData};
use super::ports::InvoiceRepository;
use crate::domain::errors::RepositoryError;

const ENTITY: &str = "Invoice";

pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
}

impl InvoiceService {
  pub fn new(invoice_repo: Arc<dyn InvoiceRepository>) -> Self {
    Self { invoice_repo }
  }

  pub async fn list_invoices(&self) -> Result<Vec<Invoice>, RepositoryError> {
    self.invoice_repo.find_all().await
  }

  pub async fn get_invoice(&self, id: i64) -> Result<Invoice, RepositoryError> {
    self
      .invoice_repo
      .find_by_id(id)
      .await?
      .ok_or(RepositoryError::not_found(ENTITY, id))
  }

  pub async fn create_invoice(&self, data: InvoiceData) -> Result<Invoice, RepositoryError> {
    validate_lines(&data)?;

    let invoice = self.invoice_repo.create(data).await?;
    tracing::info!(
      invoice_id = invoice.id,
      uuid = %invoice.uuid,
      lines = invoice.lines.len(),
      "Invoice created"
    );
    Ok(invoice)
  }

  /// Full replacement: prior lines are discarded in favour of `data.lines`
  pub async fn update_invoice(
    &self,
    id: i64,
    data: InvoiceData,
  ) -> Result<Invoice, RepositoryError> {
    validate_lines(&data)?;

    let invoice = self
      .invoice_repo
      .update(id, data)
      .await?
      .ok_or(RepositoryError::not_found(ENTITY, id))?;
    tracing::info!(
      invoice_id = invoice.id,
      lines = invoice.lines.len(),
      "Invoice updated"
    );
    Ok(invoice)
  }

  pub async fn delete_invoice(&self, id: i64) -> Result<(), RepositoryError> {
    if !self.invoice_repo.delete(id).await? {
      return Err(RepositoryError::not_found(ENTITY, id));
    }
    tracing::info!(invoice_id = id, "Invoice deleted");
    Ok(())
  }
}

fn validate_lines(data: &InvoiceData) -> Result<(), RepositoryError> {
  if let Some(line) = data.lines.iter().find(|line| line.quantity < 1) {
    return Err(RepositoryError::Validation(format!(
      "Quantity must be at least 1, got {} for product {}",
      line.quantity, line.product_id
    )));
  }
  Ok(())
}
