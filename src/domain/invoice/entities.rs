use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::value_objects::month_name_pt;
use crate::domain::company::Company;
use crate::domain::product::Product;
use crate::domain::remit::RemitInformation;

// Invoice - fully resolved aggregate as returned by every read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
  pub id: i64,
  pub uuid: Uuid,
  pub number: Option<i64>,
  pub additional_information: Option<String>,
  #[serde(with = "rust_decimal::serde::float")]
  pub discount: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  pub penalty: Decimal,
  pub paid: bool,
  pub issue_date: DateTime<Utc>,
  pub due_date: DateTime<Utc>,
  pub remit_information: RemitInformation,
  pub company: Company,
  pub client: Company,
  pub lines: Vec<InvoiceLine>,
}

impl Invoice {
  /// Sum of all line totals
  pub fn subtotal(&self) -> Decimal {
    self.lines.iter().map(InvoiceLine::total).sum()
  }

  pub fn total(&self) -> Decimal {
    self.subtotal() - self.discount + self.penalty
  }

  /// Sequence number when one is set, otherwise the UUID.
  /// A number of zero counts as unset.
  pub fn identification(&self) -> String {
    match self.number {
      Some(number) if number != 0 => number.to_string(),
      _ => self.uuid.to_string(),
    }
  }

  /// Display name used for downloaded documents, e.g. `AcmeLtda_invoice_20240131`
  pub fn repr(&self) -> String {
    let client_name: String = self
      .client
      .name
      .chars()
      .filter(|c| !c.is_whitespace())
      .collect();
    format!(
      "{}_invoice_{}",
      client_name,
      self.issue_date.format("%Y%m%d")
    )
  }

  /// Portuguese name of the due date's month
  pub fn due_month(&self) -> &'static str {
    month_name_pt(self.due_date.month0())
  }
}

// Invoice Line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
  pub id: i64,
  pub invoice_id: i64,
  pub product: Product,
  pub quantity: i64,
  pub description: Option<String>,
}

impl InvoiceLine {
  pub fn total(&self) -> Decimal {
    self.product.price * Decimal::from(self.quantity)
  }
}

/// Full set of invoice fields supplied on create and update
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceData {
  /// Generated on create when missing or nil; kept as stored on update when missing
  pub uuid: Option<Uuid>,
  pub number: Option<i64>,
  pub additional_information: Option<String>,
  pub discount: Decimal,
  pub penalty: Decimal,
  pub paid: bool,
  /// Defaults to the creation time
  pub issue_date: Option<DateTime<Utc>>,
  pub due_date: DateTime<Utc>,
  pub remit_information_id: i64,
  pub company_id: i64,
  pub client_id: i64,
  pub lines: Vec<InvoiceLineData>,
}

impl InvoiceData {
  /// The supplied UUID unless it is missing or nil
  pub fn supplied_uuid(&self) -> Option<Uuid> {
    self.uuid.filter(|uuid| !uuid.is_nil())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLineData {
  pub product_id: i64,
  pub quantity: i64,
  pub description: Option<String>,
}
