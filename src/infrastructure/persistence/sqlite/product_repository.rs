use async_trait::async_trait;
use sqlx::SqlitePool;

use super::parse_decimal;
use crate::domain::errors::RepositoryError;
use crate::domain::product::{Product, ProductData, ProductRepository};

/// SQLite implementation of the ProductRepository trait
pub struct SqliteProductRepository {
  pool: SqlitePool,
}

impl SqliteProductRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
  id: i64,
  name: String,
  description: Option<String>,
  price: String,
}

impl TryFrom<ProductRow> for Product {
  type Error = RepositoryError;

  fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
    Ok(Product {
      id: row.id,
      name: row.name,
      description: row.description,
      price: parse_decimal("price", &row.price)?,
    })
  }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
  async fn create(&self, data: ProductData) -> Result<Product, RepositoryError> {
    let row = sqlx::query_as::<_, ProductRow>(
      r#"
            INSERT INTO products (name, description, price)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, description, price
            "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price.to_string())
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, id: i64, data: ProductData) -> Result<Option<Product>, RepositoryError> {
    let row = sqlx::query_as::<_, ProductRow>(
      r#"
            UPDATE products
            SET name = ?2, description = ?3, price = ?4
            WHERE id = ?1
            RETURNING id, name, description, price
            "#,
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price.to_string())
    .fetch_optional(&self.pool)
    .await?;

    row.map(TryInto::try_into).transpose()
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
    let row = sqlx::query_as::<_, ProductRow>(
      "SELECT id, name, description, price FROM products WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(TryInto::try_into).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
    let rows = sqlx::query_as::<_, ProductRow>(
      "SELECT id, name, description, price FROM products ORDER BY id",
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(TryInto::try_into).collect()
  }

  async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    let (references,): (i64,) =
      sqlx::query_as("SELECT COUNT(*) FROM invoice_lines WHERE product_id = ?1")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    if references > 0 {
      return Err(RepositoryError::restricted(
        "Product",
        id,
        format!("referenced by {} invoice line(s)", references),
      ));
    }

    let result = sqlx::query("DELETE FROM products WHERE id = ?1")
      .bind(id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::sqlite::test_pool;
  use rust_decimal_macros::dec;

  fn data(name: &str, price: rust_decimal::Decimal) -> ProductData {
    ProductData {
      name: name.to_string(),
      description: Some("Monthly plan".to_string()),
      price,
    }
  }

  #[tokio::test]
  async fn test_price_round_trips_exactly() {
    let repo = SqliteProductRepository::new(test_pool().await);

    let created = repo.create(data("Hosting", dec!(99.90))).await.unwrap();
    let fetched = repo.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(fetched.price, dec!(99.90));
    assert_eq!(fetched.description.as_deref(), Some("Monthly plan"));
  }

  #[tokio::test]
  async fn test_update_and_missing() {
    let repo = SqliteProductRepository::new(test_pool().await);
    let created = repo.create(data("Hosting", dec!(10))).await.unwrap();

    let updated = repo
      .update(
        created.id,
        ProductData {
          name: "Hosting Pro".to_string(),
          description: None,
          price: dec!(25.50),
        },
      )
      .await
      .unwrap()
      .unwrap();
    assert_eq!(updated.name, "Hosting Pro");
    assert_eq!(updated.description, None);
    assert_eq!(updated.price, dec!(25.50));

    assert!(repo.find_by_id(424242).await.unwrap().is_none());
    assert!(!repo.delete(424242).await.unwrap());
  }

  #[tokio::test]
  async fn test_delete_referenced_product_is_restricted() {
    let pool = test_pool().await;
    let repo = SqliteProductRepository::new(pool.clone());
    let product = repo.create(data("Hosting", dec!(10))).await.unwrap();

    sqlx::query("INSERT INTO companies (name, document, address) VALUES ('Acme', '1', 'Street')")
      .execute(&pool)
      .await
      .unwrap();
    sqlx::query("INSERT INTO remit_informations (name) VALUES ('Bank')")
      .execute(&pool)
      .await
      .unwrap();
    sqlx::query(
      r#"
            INSERT INTO invoices (uuid, issue_date, due_date, remit_information_id, company_id, client_id)
            VALUES ('b3b9c1a0-0000-4000-8000-000000000002', '2024-01-01T00:00:00Z', '2024-02-01T00:00:00Z', 1, 1, 1)
            "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO invoice_lines (invoice_id, product_id, quantity) VALUES (1, ?1, 2)")
      .bind(product.id)
      .execute(&pool)
      .await
      .unwrap();

    let result = repo.delete(product.id).await;
    assert!(matches!(result, Err(RepositoryError::Restricted { .. })));

    assert!(repo.find_by_id(product.id).await.unwrap().is_some());
    let (lines,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoice_lines")
      .fetch_one(&pool)
      .await
      .unwrap();
    assert_eq!(lines, 1);
  }
}
