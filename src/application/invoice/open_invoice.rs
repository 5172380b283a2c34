use std::sync::Arc;

use crate::domain::invoice::{
  DocumentError, DocumentRenderer, InvoiceDocument, InvoiceService, TemplateName,
};

#[derive(Debug, Clone)]
pub struct OpenInvoiceCommand {
  pub invoice_id: i64,
  pub template: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenInvoiceResponse {
  /// Display name of the document, e.g. `AcmeLtda_invoice_20240131`
  pub repr: String,
  pub html: String,
}

/// Renders one invoice through a named template
pub struct OpenInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
  renderer: Arc<dyn DocumentRenderer>,
}

impl OpenInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, renderer: Arc<dyn DocumentRenderer>) -> Self {
    Self {
      invoice_service,
      renderer,
    }
  }

  /// The template name is checked before the invoice is loaded, so a bad
  /// name is reported even for an unknown invoice.
  pub async fn execute(
    &self,
    command: OpenInvoiceCommand,
  ) -> Result<OpenInvoiceResponse, DocumentError> {
    let template = TemplateName::new(command.template.unwrap_or_default())?;

    let invoice = self.invoice_service.get_invoice(command.invoice_id).await?;
    let document = InvoiceDocument::from(invoice);

    let html = self.renderer.render(&template, &document).await?;
    tracing::debug!(
      invoice_id = command.invoice_id,
      template = %template,
      bytes = html.len(),
      "Invoice rendered"
    );

    Ok(OpenInvoiceResponse {
      repr: document.repr,
      html,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::errors::RepositoryError;
  use crate::domain::invoice::{Invoice, InvoiceData, InvoiceRepository};
  use async_trait::async_trait;

  struct EmptyInvoiceRepository;

  #[async_trait]
  impl InvoiceRepository for EmptyInvoiceRepository {
    async fn create(&self, _data: InvoiceData) -> Result<Invoice, RepositoryError> {
      unimplemented!()
    }

    async fn update(&self, _id: i64, _data: InvoiceData) -> Result<Option<Invoice>, RepositoryError> {
      unimplemented!()
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Invoice>, RepositoryError> {
      Ok(None)
    }

    async fn find_all(&self) -> Result<Vec<Invoice>, RepositoryError> {
      Ok(vec![])
    }

    async fn delete(&self, _id: i64) -> Result<bool, RepositoryError> {
      Ok(false)
    }
  }

  struct EchoRenderer;

  #[async_trait]
  impl DocumentRenderer for EchoRenderer {
    async fn list_templates(&self) -> Result<Vec<String>, DocumentError> {
      Ok(vec!["default.html".to_string()])
    }

    async fn render(
      &self,
      template: &TemplateName,
      document: &InvoiceDocument,
    ) -> Result<String, DocumentError> {
      Ok(format!("{}:{}", template, document.repr))
    }
  }

  fn use_case() -> OpenInvoiceUseCase {
    OpenInvoiceUseCase::new(
      Arc::new(InvoiceService::new(Arc::new(EmptyInvoiceRepository))),
      Arc::new(EchoRenderer),
    )
  }

  #[tokio::test]
  async fn test_missing_template_name() {
    let result = use_case()
      .execute(OpenInvoiceCommand {
        invoice_id: 1,
        template: None,
      })
      .await;
    assert!(matches!(result, Err(DocumentError::InvalidTemplateName(_))));
  }

  #[tokio::test]
  async fn test_unknown_invoice() {
    let result = use_case()
      .execute(OpenInvoiceCommand {
        invoice_id: 42,
        template: Some("default.html".to_string()),
      })
      .await;
    assert!(matches!(
      result,
      Err(DocumentError::Repository(RepositoryError::NotFound { id: 42, .. }))
    ));
  }
}
