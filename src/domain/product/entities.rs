use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub description: Option<String>,
  /// Unit price, never negative
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductData {
  pub name: String,
  pub description: Option<String>,
  pub price: Decimal,
}
