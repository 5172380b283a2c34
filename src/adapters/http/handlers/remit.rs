use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use super::parse_id;
use crate::{
  adapters::http::{
    dtos::{RemitInformationRequest, RemitInformationResponse},
    errors::ApiError,
  },
  domain::remit::RemitInformationService,
};

/// GET /api/remit
pub async fn list_remit_informations_handler(
  service: web::Data<Arc<RemitInformationService>>,
) -> Result<HttpResponse, ApiError> {
  let remits: Vec<RemitInformationResponse> = service
    .list_remit_informations()
    .await?
    .into_iter()
    .map(Into::into)
    .collect();

  Ok(HttpResponse::Ok().json(remits))
}

/// GET /api/remit/{id}
pub async fn get_remit_information_handler(
  path: web::Path<String>,
  service: web::Data<Arc<RemitInformationService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "remit information")?;
  let remit = service.get_remit_information(id).await?;

  Ok(HttpResponse::Ok().json(RemitInformationResponse::from(remit)))
}

/// POST /api/remit
pub async fn create_remit_information_handler(
  request: web::Json<RemitInformationRequest>,
  service: web::Data<Arc<RemitInformationService>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let remit = service
    .create_remit_information(request.into_inner().into())
    .await?;

  Ok(HttpResponse::Created().json(RemitInformationResponse::from(remit)))
}

/// PUT /api/remit/{id}
///
/// The submitted lines replace the stored set.
pub async fn update_remit_information_handler(
  path: web::Path<String>,
  request: web::Json<RemitInformationRequest>,
  service: web::Data<Arc<RemitInformationService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "remit information")?;
  request.validate()?;

  let remit = service
    .update_remit_information(id, request.into_inner().into())
    .await?;

  Ok(HttpResponse::Ok().json(RemitInformationResponse::from(remit)))
}

/// DELETE /api/remit/{id}
pub async fn delete_remit_information_handler(
  path: web::Path<String>,
  service: web::Data<Arc<RemitInformationService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "remit information")?;
  service.delete_remit_information(id).await?;

  Ok(HttpResponse::NoContent().finish())
}
