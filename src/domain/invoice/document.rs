use rust_decimal::Decimal;
use serde::Serialize;

use super::entities::{Invoice, InvoiceLine};

/// Template context for an invoice document.
///
/// Derived values are computed when the document is built and are
/// available to templates next to the raw invoice, e.g.
/// `{{ invoice.client.name }}` or `{{ total | round(precision=2) }}`.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDocument {
  pub invoice: Invoice,
  pub lines: Vec<InvoiceLineDocument>,
  #[serde(with = "rust_decimal::serde::float")]
  pub subtotal: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  pub total: Decimal,
  pub identification: String,
  pub repr: String,
  pub due_month: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLineDocument {
  #[serde(flatten)]
  pub line: InvoiceLine,
  #[serde(with = "rust_decimal::serde::float")]
  pub total: Decimal,
}

impl From<Invoice> for InvoiceDocument {
  fn from(invoice: Invoice) -> Self {
    let lines = invoice
      .lines
      .iter()
      .map(|line| InvoiceLineDocument {
        line: line.clone(),
        total: line.total(),
      })
      .collect();

    Self {
      subtotal: invoice.subtotal(),
      total: invoice.total(),
      identification: invoice.identification(),
      repr: invoice.repr(),
      due_month: invoice.due_month(),
      lines,
      invoice,
    }
  }
}
