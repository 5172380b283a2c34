use async_trait::async_trait;
use std::error::Error as _;
use std::io::ErrorKind;
use std::path::PathBuf;
use tera::{Context, Tera};

use crate::domain::invoice::{DocumentError, DocumentRenderer, InvoiceDocument, TemplateName};

/// Renders invoice documents from the Tera templates in one directory.
///
/// Templates are read from disk on every call, so edits show up without
/// a restart.
pub struct TeraDocumentRenderer {
  template_dir: PathBuf,
}

impl TeraDocumentRenderer {
  pub fn new(template_dir: impl Into<PathBuf>) -> Self {
    Self {
      template_dir: template_dir.into(),
    }
  }
}

/// tera keeps the interesting part of a failure in the source chain
fn describe(error: &tera::Error) -> String {
  let mut message = error.to_string();
  let mut source = error.source();
  while let Some(cause) = source {
    message.push_str(": ");
    message.push_str(&cause.to_string());
    source = cause.source();
  }
  message
}

#[async_trait]
impl DocumentRenderer for TeraDocumentRenderer {
  async fn list_templates(&self) -> Result<Vec<String>, DocumentError> {
    let mut entries = tokio::fs::read_dir(&self.template_dir).await?;

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
      if entry.file_type().await?.is_file() {
        names.push(entry.file_name().to_string_lossy().into_owned());
      }
    }
    names.sort();

    Ok(names)
  }

  async fn render(
    &self,
    template: &TemplateName,
    document: &InvoiceDocument,
  ) -> Result<String, DocumentError> {
    let path = self.template_dir.join(template.value());
    let source = match tokio::fs::read_to_string(&path).await {
      Ok(source) => source,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        return Err(DocumentError::TemplateNotFound(template.to_string()));
      }
      Err(e) => return Err(e.into()),
    };

    let mut tera = Tera::default();
    tera.autoescape_on(vec![".html", ".htm"]);
    tera
      .add_raw_template(template.value(), &source)
      .map_err(|e| DocumentError::Render(describe(&e)))?;

    let context =
      Context::from_serialize(document).map_err(|e| DocumentError::Render(describe(&e)))?;

    tera
      .render(template.value(), &context)
      .map_err(|e| DocumentError::Render(describe(&e)))
  }
}
