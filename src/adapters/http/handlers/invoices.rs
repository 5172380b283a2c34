use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use super::parse_id;
use crate::{
  adapters::http::{
    dtos::{InvoiceRequest, InvoiceResponse},
    errors::ApiError,
  },
  domain::invoice::InvoiceService,
};

/// List invoices with lines, remit information and companies resolved
/// GET /api/invoices
pub async fn list_invoices_handler(
  service: web::Data<Arc<InvoiceService>>,
) -> Result<HttpResponse, ApiError> {
  let invoices: Vec<InvoiceResponse> = service
    .list_invoices()
    .await?
    .into_iter()
    .map(Into::into)
    .collect();

  Ok(HttpResponse::Ok().json(invoices))
}

/// GET /api/invoices/{id}
pub async fn get_invoice_handler(
  path: web::Path<String>,
  service: web::Data<Arc<InvoiceService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "invoice")?;
  let invoice = service.get_invoice(id).await?;

  Ok(HttpResponse::Ok().json(InvoiceResponse::from(invoice)))
}

/// Create invoice together with its lines
/// POST /api/invoices
pub async fn create_invoice_handler(
  request: web::Json<InvoiceRequest>,
  service: web::Data<Arc<InvoiceService>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let invoice = service.create_invoice(request.into_inner().into()).await?;

  Ok(HttpResponse::Created().json(InvoiceResponse::from(invoice)))
}

/// Replace invoice and its whole line set
/// PUT /api/invoices/{id}
pub async fn update_invoice_handler(
  path: web::Path<String>,
  request: web::Json<InvoiceRequest>,
  service: web::Data<Arc<InvoiceService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "invoice")?;
  request.validate()?;

  let invoice = service
    .update_invoice(id, request.into_inner().into())
    .await?;

  Ok(HttpResponse::Ok().json(InvoiceResponse::from(invoice)))
}

/// DELETE /api/invoices/{id}
pub async fn delete_invoice_handler(
  path: web::Path<String>,
  service: web::Data<Arc<InvoiceService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "invoice")?;
  service.delete_invoice(id).await?;

  Ok(HttpResponse::NoContent().finish())
}
