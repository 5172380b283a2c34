use async_trait::async_trait;

use super::entities::{Product, ProductData};
use crate::domain::errors::RepositoryError;

#[async_trait]
pub trait ProductRepository: Send + Sync {
  async fn create(&self, data: ProductData) -> Result<Product, RepositoryError>;
  async fn update(&self, id: i64, data: ProductData) -> Result<Option<Product>, RepositoryError>;
  async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError>;
  async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

  /// Fails with `Restricted` while any invoice line references the product
  async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}
