use rust_decimal::Decimal;
use std::sync::Arc;

use super::{
  entities::{Product, ProductData},
  ports::ProductRepository,
};
use crate::domain::errors::RepositoryError;

const ENTITY: &str = "Product";

pub struct ProductService {
  product_repo: Arc<dyn ProductRepository>,
}

impl ProductService {
  pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
    Self { product_repo }
  }

  pub async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
    self.product_repo.find_all().await
  }

  pub async fn get_product(&self, id: i64) -> Result<Product, RepositoryError> {
    self
      .product_repo
      .find_by_id(id)
      .await?
      .ok_or(RepositoryError::not_found(ENTITY, id))
  }

  pub async fn create_product(&self, data: ProductData) -> Result<Product, RepositoryError> {
    ensure_valid_price(&data)?;
    let product = self.product_repo.create(data).await?;
    tracing::info!(product_id = product.id, "Product created");
    Ok(product)
  }

  pub async fn update_product(
    &self,
    id: i64,
    data: ProductData,
  ) -> Result<Product, RepositoryError> {
    ensure_valid_price(&data)?;
    self
      .product_repo
      .update(id, data)
      .await?
      .ok_or(RepositoryError::not_found(ENTITY, id))
  }

  pub async fn delete_product(&self, id: i64) -> Result<(), RepositoryError> {
    if !self.product_repo.delete(id).await? {
      return Err(RepositoryError::not_found(ENTITY, id));
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(())
  }
}

fn ensure_valid_price(data: &ProductData) -> Result<(), RepositoryError> {
  if data.price < Decimal::ZERO {
    return Err(RepositoryError::Validation(
      "Price must not be negative".to_string(),
    ));
  }
  Ok(())
}
