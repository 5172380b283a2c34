use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

use crate::domain::errors::RepositoryError;
use crate::domain::remit::{
  RemitInformation, RemitInformationData, RemitInformationLine, RemitInformationRepository,
  RemitLineData,
};

/// SQLite implementation of the RemitInformationRepository trait
pub struct SqliteRemitInformationRepository {
  pool: SqlitePool,
}

impl SqliteRemitInformationRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  /// Loads one remit information (`Some(id)`) or all of them (`None`) with their lines
  async fn load(&self, id: Option<i64>) -> Result<Vec<RemitInformation>, RepositoryError> {
    let mut conn = self.pool.acquire().await?;
    load_remit_informations(&mut conn, id).await
  }
}

#[derive(Debug, sqlx::FromRow)]
struct RemitInformationRow {
  id: i64,
  name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct RemitInformationLineRow {
  id: i64,
  key: String,
  value: String,
  remit_information_id: i64,
}

impl From<RemitInformationLineRow> for RemitInformationLine {
  fn from(row: RemitInformationLineRow) -> Self {
    RemitInformationLine {
      id: row.id,
      key: row.key,
      value: row.value,
      remit_information_id: row.remit_information_id,
    }
  }
}

/// Shared with the invoice repository, which resolves remit information eagerly
pub(super) async fn load_remit_informations(
  conn: &mut SqliteConnection,
  id: Option<i64>,
) -> Result<Vec<RemitInformation>, RepositoryError> {
  let rows = sqlx::query_as::<_, RemitInformationRow>(
    "SELECT id, name FROM remit_informations WHERE (?1 IS NULL OR id = ?1) ORDER BY id",
  )
  .bind(id)
  .fetch_all(&mut *conn)
  .await?;

  let line_rows = sqlx::query_as::<_, RemitInformationLineRow>(
    r#"
        SELECT id, "key", "value", remit_information_id
        FROM remit_information_lines
        WHERE (?1 IS NULL OR remit_information_id = ?1)
        ORDER BY id
        "#,
  )
  .bind(id)
  .fetch_all(&mut *conn)
  .await?;

  let mut lines: HashMap<i64, Vec<RemitInformationLine>> = HashMap::new();
  for row in line_rows {
    lines
      .entry(row.remit_information_id)
      .or_default()
      .push(row.into());
  }

  Ok(
    rows
      .into_iter()
      .map(|row| RemitInformation {
        lines: lines.remove(&row.id).unwrap_or_default(),
        id: row.id,
        name: row.name,
      })
      .collect(),
  )
}

async fn insert_lines(
  conn: &mut SqliteConnection,
  remit_information_id: i64,
  lines: &[RemitLineData],
) -> Result<Vec<RemitInformationLine>, RepositoryError> {
  let mut inserted = Vec::with_capacity(lines.len());
  for line in lines {
    let row = sqlx::query_as::<_, RemitInformationLineRow>(
      r#"
            INSERT INTO remit_information_lines ("key", "value", remit_information_id)
            VALUES (?1, ?2, ?3)
            RETURNING id, "key", "value", remit_information_id
            "#,
    )
    .bind(&line.key)
    .bind(&line.value)
    .bind(remit_information_id)
    .fetch_one(&mut *conn)
    .await?;
    inserted.push(row.into());
  }
  Ok(inserted)
}

#[async_trait]
impl RemitInformationRepository for SqliteRemitInformationRepository {
  async fn create(&self, data: RemitInformationData) -> Result<RemitInformation, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    let row = sqlx::query_as::<_, RemitInformationRow>(
      "INSERT INTO remit_informations (name) VALUES (?1) RETURNING id, name",
    )
    .bind(&data.name)
    .fetch_one(&mut *tx)
    .await?;

    let lines = insert_lines(&mut tx, row.id, &data.lines).await?;
    tx.commit().await?;

    Ok(RemitInformation {
      id: row.id,
      name: row.name,
      lines,
    })
  }

  async fn update(
    &self,
    id: i64,
    data: RemitInformationData,
  ) -> Result<Option<RemitInformation>, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    let Some(row) = sqlx::query_as::<_, RemitInformationRow>(
      "UPDATE remit_informations SET name = ?2 WHERE id = ?1 RETURNING id, name",
    )
    .bind(id)
    .bind(&data.name)
    .fetch_optional(&mut *tx)
    .await?
    else {
      return Ok(None);
    };

    sqlx::query("DELETE FROM remit_information_lines WHERE remit_information_id = ?1")
      .bind(id)
      .execute(&mut *tx)
      .await?;
    let lines = insert_lines(&mut tx, id, &data.lines).await?;

    tx.commit().await?;

    Ok(Some(RemitInformation {
      id: row.id,
      name: row.name,
      lines,
    }))
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<RemitInformation>, RepositoryError> {
    Ok(self.load(Some(id)).await?.into_iter().next())
  }

  async fn find_all(&self) -> Result<Vec<RemitInformation>, RepositoryError> {
    self.load(None).await
  }

  async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    let (references,): (i64,) =
      sqlx::query_as("SELECT COUNT(*) FROM invoices WHERE remit_information_id = ?1")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    if references > 0 {
      return Err(RepositoryError::restricted(
        "RemitInformation",
        id,
        format!("referenced by {} invoice(s)", references),
      ));
    }

    sqlx::query("DELETE FROM remit_information_lines WHERE remit_information_id = ?1")
      .bind(id)
      .execute(&mut *tx)
      .await?;
    let result = sqlx::query("DELETE FROM remit_informations WHERE id = ?1")
      .bind(id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
  }
}
