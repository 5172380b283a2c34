use std::sync::Arc;

use crate::domain::invoice::{DocumentError, DocumentRenderer};

pub struct ListInvoiceTemplatesUseCase {
  renderer: Arc<dyn DocumentRenderer>,
}

impl ListInvoiceTemplatesUseCase {
  pub fn new(renderer: Arc<dyn DocumentRenderer>) -> Self {
    Self { renderer }
  }

  pub async fn execute(&self) -> Result<Vec<String>, DocumentError> {
    self.renderer.list_templates().await
  }
}
