use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use super::parse_id;
use crate::{
  adapters::http::{
    dtos::{CompanyRequest, CompanyResponse},
    errors::ApiError,
  },
  domain::company::CompanyService,
};

/// List companies
/// GET /api/companies
pub async fn list_companies_handler(
  service: web::Data<Arc<CompanyService>>,
) -> Result<HttpResponse, ApiError> {
  let companies: Vec<CompanyResponse> = service
    .list_companies()
    .await?
    .into_iter()
    .map(Into::into)
    .collect();

  Ok(HttpResponse::Ok().json(companies))
}

/// Get one company
/// GET /api/companies/{id}
pub async fn get_company_handler(
  path: web::Path<String>,
  service: web::Data<Arc<CompanyService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "company")?;
  let company = service.get_company(id).await?;

  Ok(HttpResponse::Ok().json(CompanyResponse::from(company)))
}

/// Create company
/// POST /api/companies
pub async fn create_company_handler(
  request: web::Json<CompanyRequest>,
  service: web::Data<Arc<CompanyService>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let company = service.create_company(request.into_inner().into()).await?;

  Ok(HttpResponse::Created().json(CompanyResponse::from(company)))
}

/// Replace company
/// PUT /api/companies/{id}
pub async fn update_company_handler(
  path: web::Path<String>,
  request: web::Json<CompanyRequest>,
  service: web::Data<Arc<CompanyService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "company")?;
  request.validate()?;

  let company = service
    .update_company(id, request.into_inner().into())
    .await?;

  Ok(HttpResponse::Ok().json(CompanyResponse::from(company)))
}

/// Delete company
/// DELETE /api/companies/{id}
pub async fn delete_company_handler(
  path: web::Path<String>,
  service: web::Data<Arc<CompanyService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "company")?;
  service.delete_company(id).await?;

  Ok(HttpResponse::NoContent().finish())
}
