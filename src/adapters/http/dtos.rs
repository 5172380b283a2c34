//! Wire format of the REST API, kept apart from domain entities and storage rows

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::company::{Company, CompanyData};
use crate::domain::invoice::{Invoice, InvoiceData, InvoiceLine, InvoiceLineData};
use crate::domain::product::{Product, ProductData};
use crate::domain::remit::{
  RemitInformation, RemitInformationData, RemitInformationLine, RemitLineData,
};

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
  if *value < Decimal::ZERO {
    return Err(
      ValidationError::new("non_negative").with_message("Price must not be negative".into()),
    );
  }
  Ok(())
}

fn default_quantity() -> i64 {
  1
}

// ============================================================================
// Companies
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompanyRequest {
  #[validate(length(min = 1, message = "Name is required"))]
  pub name: String,

  /// Tax identification document
  #[validate(length(min = 1, max = 30, message = "Document must be between 1 and 30 characters"))]
  pub document: String,

  #[validate(length(min = 1, message = "Address is required"))]
  pub address: String,
}

impl From<CompanyRequest> for CompanyData {
  fn from(request: CompanyRequest) -> Self {
    CompanyData {
      name: request.name,
      document: request.document,
      address: request.address,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyResponse {
  pub id: i64,
  pub name: String,
  pub document: String,
  pub address: String,
}

impl From<Company> for CompanyResponse {
  fn from(company: Company) -> Self {
    CompanyResponse {
      id: company.id,
      name: company.name,
      document: company.document,
      address: company.address,
    }
  }
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductRequest {
  #[validate(length(min = 1, message = "Name is required"))]
  pub name: String,

  #[serde(default)]
  pub description: Option<String>,

  #[serde(with = "rust_decimal::serde::float")]
  #[validate(custom(function = "validate_non_negative"))]
  pub price: Decimal,
}

impl From<ProductRequest> for ProductData {
  fn from(request: ProductRequest) -> Self {
    ProductData {
      name: request.name,
      description: request.description,
      price: request.price,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
  pub id: i64,
  pub name: String,
  pub description: Option<String>,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
}

impl From<Product> for ProductResponse {
  fn from(product: Product) -> Self {
    ProductResponse {
      id: product.id,
      name: product.name,
      description: product.description,
      price: product.price,
    }
  }
}

// ============================================================================
// Remit information
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RemitInformationRequest {
  #[validate(length(min = 1, message = "Name is required"))]
  pub name: String,

  #[serde(default)]
  #[validate(nested)]
  pub lines: Vec<RemitLineRequest>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RemitLineRequest {
  #[validate(length(min = 1, message = "Line key is required"))]
  pub key: String,

  pub value: String,
}

impl From<RemitInformationRequest> for RemitInformationData {
  fn from(request: RemitInformationRequest) -> Self {
    RemitInformationData {
      name: request.name,
      lines: request
        .lines
        .into_iter()
        .map(|line| RemitLineData {
          key: line.key,
          value: line.value,
        })
        .collect(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct RemitInformationResponse {
  pub id: i64,
  pub name: String,
  pub lines: Vec<RemitLineResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemitLineResponse {
  pub id: i64,
  pub key: String,
  pub value: String,
  pub remit_information_id: i64,
}

impl From<RemitInformationLine> for RemitLineResponse {
  fn from(line: RemitInformationLine) -> Self {
    RemitLineResponse {
      id: line.id,
      key: line.key,
      value: line.value,
      remit_information_id: line.remit_information_id,
    }
  }
}

impl From<RemitInformation> for RemitInformationResponse {
  fn from(remit: RemitInformation) -> Self {
    RemitInformationResponse {
      id: remit.id,
      name: remit.name,
      lines: remit.lines.into_iter().map(Into::into).collect(),
    }
  }
}

// ============================================================================
// Invoices
// ============================================================================

/// Full invoice record; update replaces every field and the line set
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceRequest {
  #[serde(default)]
  pub uuid: Option<Uuid>,

  #[serde(default)]
  pub number: Option<i64>,

  #[serde(default)]
  pub additional_information: Option<String>,

  #[serde(default, with = "rust_decimal::serde::float")]
  pub discount: Decimal,

  #[serde(default, with = "rust_decimal::serde::float")]
  pub penalty: Decimal,

  #[serde(default)]
  pub paid: bool,

  #[serde(default)]
  pub issue_date: Option<DateTime<Utc>>,

  pub due_date: DateTime<Utc>,

  pub remit_information_id: i64,
  pub company_id: i64,
  pub client_id: i64,

  #[serde(default)]
  #[validate(nested)]
  pub invoice_lines: Vec<InvoiceLineRequest>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceLineRequest {
  pub product_id: i64,

  #[serde(default = "default_quantity")]
  #[validate(range(min = 1, message = "Quantity must be at least 1"))]
  pub quantity: i64,

  #[serde(default)]
  pub description: Option<String>,
}

impl From<InvoiceRequest> for InvoiceData {
  fn from(request: InvoiceRequest) -> Self {
    InvoiceData {
      uuid: request.uuid,
      number: request.number,
      additional_information: request.additional_information,
      discount: request.discount,
      penalty: request.penalty,
      paid: request.paid,
      issue_date: request.issue_date,
      due_date: request.due_date,
      remit_information_id: request.remit_information_id,
      company_id: request.company_id,
      client_id: request.client_id,
      lines: request
        .invoice_lines
        .into_iter()
        .map(|line| InvoiceLineData {
          product_id: line.product_id,
          quantity: line.quantity,
          description: line.description,
        })
        .collect(),
    }
  }
}

/// Invoice with every relation resolved and the derived values computed
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
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
  pub remit_information_id: i64,
  pub remit_information: RemitInformationResponse,
  pub company_id: i64,
  pub company: CompanyResponse,
  pub client_id: i64,
  pub client: CompanyResponse,
  pub invoice_lines: Vec<InvoiceLineResponse>,
  #[serde(with = "rust_decimal::serde::float")]
  pub subtotal: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  pub total: Decimal,
  pub identification: String,
  pub repr: String,
  pub due_month: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLineResponse {
  pub id: i64,
  pub invoice_id: i64,
  pub product_id: i64,
  pub product: ProductResponse,
  pub quantity: i64,
  pub description: Option<String>,
  #[serde(with = "rust_decimal::serde::float")]
  pub total: Decimal,
}

impl From<InvoiceLine> for InvoiceLineResponse {
  fn from(line: InvoiceLine) -> Self {
    InvoiceLineResponse {
      total: line.total(),
      id: line.id,
      invoice_id: line.invoice_id,
      product_id: line.product.id,
      product: line.product.into(),
      quantity: line.quantity,
      description: line.description,
    }
  }
}

impl From<Invoice> for InvoiceResponse {
  fn from(invoice: Invoice) -> Self {
    let subtotal = invoice.subtotal();
    let total = invoice.total();
    let identification = invoice.identification();
    let repr = invoice.repr();
    let due_month = invoice.due_month().to_string();

    InvoiceResponse {
      id: invoice.id,
      uuid: invoice.uuid,
      number: invoice.number,
      additional_information: invoice.additional_information,
      discount: invoice.discount,
      penalty: invoice.penalty,
      paid: invoice.paid,
      issue_date: invoice.issue_date,
      due_date: invoice.due_date,
      remit_information_id: invoice.remit_information.id,
      remit_information: invoice.remit_information.into(),
      company_id: invoice.company.id,
      company: invoice.company.into(),
      client_id: invoice.client.id,
      client: invoice.client.into(),
      invoice_lines: invoice.lines.into_iter().map(Into::into).collect(),
      subtotal,
      total,
      identification,
      repr,
      due_month,
    }
  }
}

// ============================================================================
// Errors
// ============================================================================

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error kind, e.g. `validation_error`
  pub error: String,

  /// Human-readable error message
  pub message: String,
}
