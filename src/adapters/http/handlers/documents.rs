use actix_web::{
  HttpResponse,
  http::header::{
    Charset, ContentDisposition, ContentType, DispositionParam, DispositionType, ExtendedValue,
  },
  web,
};
use serde::Deserialize;
use std::sync::Arc;

use super::parse_id;
use crate::{
  adapters::http::errors::ApiError,
  application::invoice::{ListInvoiceTemplatesUseCase, OpenInvoiceCommand, OpenInvoiceUseCase},
};

#[derive(Debug, Deserialize)]
pub struct OpenInvoiceQuery {
  pub template: Option<String>,
}

/// Non-ASCII names (accented client names) go in the RFC 5987 `filename*` form
fn inline_disposition(filename: String) -> ContentDisposition {
  let parameter = if filename.is_ascii() {
    DispositionParam::Filename(filename)
  } else {
    DispositionParam::FilenameExt(ExtendedValue {
      charset: Charset::Ext("UTF-8".to_string()),
      language_tag: None,
      value: filename.into_bytes(),
    })
  };

  ContentDisposition {
    disposition: DispositionType::Inline,
    parameters: vec![parameter],
  }
}

/// Render an invoice through one of the invoice templates.
/// The document is shown inline and named after the invoice display name.
/// GET /api/invoices/{id}/open?template=default.html
pub async fn open_invoice_handler(
  path: web::Path<String>,
  query: web::Query<OpenInvoiceQuery>,
  use_case: web::Data<Arc<OpenInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoice_id = parse_id(&path, "invoice")?;

  let response = use_case
    .execute(OpenInvoiceCommand {
      invoice_id,
      template: query.into_inner().template,
    })
    .await?;

  Ok(
    HttpResponse::Ok()
      .content_type(ContentType::html())
      .insert_header(inline_disposition(format!("{}.html", response.repr)))
      .body(response.html),
  )
}

/// GET /api/list_invoice_templates
pub async fn list_invoice_templates_handler(
  use_case: web::Data<Arc<ListInvoiceTemplatesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let templates = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(templates))
}
