pub mod companies;
pub mod documents;
pub mod invoices;
pub mod products;
pub mod remit;
pub mod session;

use crate::adapters::http::errors::ApiError;

/// Parse a numeric record id taken from the URL path
pub fn parse_id(raw: &str, entity: &str) -> Result<i64, ApiError> {
  raw
    .parse::<i64>()
    .map_err(|_| ApiError::Validation(format!("Invalid {} ID: {}", entity, raw)))
}
