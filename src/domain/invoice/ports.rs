use async_trait::async_trait;

use super::document::InvoiceDocument;
use super::entities::{Invoice, InvoiceData};
use super::errors::DocumentError;
use super::value_objects::TemplateName;
use crate::domain::errors::RepositoryError;

/// Invoice persistence. Reads return the aggregate with lines, products,
/// remit information and both companies resolved.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Inserts the invoice and its lines in one transaction
  async fn create(&self, data: InvoiceData) -> Result<Invoice, RepositoryError>;

  /// Replaces every field and the whole line set in one transaction
  async fn update(&self, id: i64, data: InvoiceData) -> Result<Option<Invoice>, RepositoryError>;

  async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, RepositoryError>;
  async fn find_all(&self) -> Result<Vec<Invoice>, RepositoryError>;

  /// Removes the lines, then the invoice, in one transaction
  async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait DocumentRenderer: Send + Sync {
  /// File names of the available invoice templates, sorted
  async fn list_templates(&self) -> Result<Vec<String>, DocumentError>;

  async fn render(
    &self,
    template: &TemplateName,
    document: &InvoiceDocument,
  ) -> Result<String, DocumentError>;
}
