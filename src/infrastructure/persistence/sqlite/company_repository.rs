use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::company::{Company, CompanyData, CompanyRepository};
use crate::domain::errors::RepositoryError;

/// SQLite implementation of the CompanyRepository trait
pub struct SqliteCompanyRepository {
  pool: SqlitePool,
}

impl SqliteCompanyRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct CompanyRow {
  id: i64,
  name: String,
  document: String,
  address: String,
}

impl From<CompanyRow> for Company {
  fn from(row: CompanyRow) -> Self {
    Company {
      id: row.id,
      name: row.name,
      document: row.document,
      address: row.address,
    }
  }
}

#[async_trait]
impl CompanyRepository for SqliteCompanyRepository {
  async fn create(&self, data: CompanyData) -> Result<Company, RepositoryError> {
    let row = sqlx::query_as::<_, CompanyRow>(
      r#"
            INSERT INTO companies (name, document, address)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, document, address
            "#,
    )
    .bind(&data.name)
    .bind(&data.document)
    .bind(&data.address)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn update(&self, id: i64, data: CompanyData) -> Result<Option<Company>, RepositoryError> {
    let row = sqlx::query_as::<_, CompanyRow>(
      r#"
            UPDATE companies
            SET name = ?2, document = ?3, address = ?4
            WHERE id = ?1
            RETURNING id, name, document, address
            "#,
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.document)
    .bind(&data.address)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Company>, RepositoryError> {
    let row = sqlx::query_as::<_, CompanyRow>(
      "SELECT id, name, document, address FROM companies WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_all(&self) -> Result<Vec<Company>, RepositoryError> {
    let rows = sqlx::query_as::<_, CompanyRow>(
      "SELECT id, name, document, address FROM companies ORDER BY id",
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    let (references,): (i64,) = sqlx::query_as(
      "SELECT COUNT(*) FROM invoices WHERE company_id = ?1 OR client_id = ?1",
    )
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    if references > 0 {
      return Err(RepositoryError::restricted(
        "Company",
        id,
        format!("referenced by {} invoice(s)", references),
      ));
    }

    let result = sqlx::query("DELETE FROM companies WHERE id = ?1")
      .bind(id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
  }
}
