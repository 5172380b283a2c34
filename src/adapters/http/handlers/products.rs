use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use super::parse_id;
use crate::{
  adapters::http::{
    dtos::{ProductRequest, ProductResponse},
    errors::ApiError,
  },
  domain::product::ProductService,
};

/// List products
/// GET /api/products
pub async fn list_products_handler(
  service: web::Data<Arc<ProductService>>,
) -> Result<HttpResponse, ApiError> {
  let products: Vec<ProductResponse> = service
    .list_products()
    .await?
    .into_iter()
    .map(Into::into)
    .collect();

  Ok(HttpResponse::Ok().json(products))
}

/// Get one product
/// GET /api/products/{id}
pub async fn get_product_handler(
  path: web::Path<String>,
  service: web::Data<Arc<ProductService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "product")?;
  let product = service.get_product(id).await?;

  Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// Create product
/// POST /api/products
pub async fn create_product_handler(
  request: web::Json<ProductRequest>,
  service: web::Data<Arc<ProductService>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let product = service.create_product(request.into_inner().into()).await?;

  Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// Replace product
/// PUT /api/products/{id}
pub async fn update_product_handler(
  path: web::Path<String>,
  request: web::Json<ProductRequest>,
  service: web::Data<Arc<ProductService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "product")?;
  request.validate()?;

  let product = service
    .update_product(id, request.into_inner().into())
    .await?;

  Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// Delete product
/// DELETE /api/products/{id}
pub async fn delete_product_handler(
  path: web::Path<String>,
  service: web::Data<Arc<ProductService>>,
) -> Result<HttpResponse, ApiError> {
  let id = parse_id(&path, "product")?;
  service.delete_product(id).await?;

  Ok(HttpResponse::NoContent().finish())
}
