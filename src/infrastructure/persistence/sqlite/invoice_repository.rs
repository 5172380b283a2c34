use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;
use uuid::Uuid;

use super::company_repository::CompanyRow;
use super::parse_decimal;
use super::remit_information_repository::load_remit_informations;
use crate::domain::company::Company;
use crate::domain::errors::RepositoryError;
use crate::domain::invoice::{Invoice, InvoiceData, InvoiceLine, InvoiceLineData, InvoiceRepository};
use crate::domain::product::Product;
use crate::domain::remit::RemitInformation;

/// SQLite implementation of the InvoiceRepository trait
pub struct SqliteInvoiceRepository {
  pool: SqlitePool,
}

impl SqliteInvoiceRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
  id: i64,
  uuid: String,
  number: Option<i64>,
  additional_information: Option<String>,
  discount: String,
  penalty: String,
  paid: bool,
  issue_date: DateTime<Utc>,
  due_date: DateTime<Utc>,
  remit_information_id: i64,
  company_id: i64,
  client_id: i64,
}

/// Invoice line joined with the product it references
#[derive(Debug, sqlx::FromRow)]
struct InvoiceLineRow {
  id: i64,
  invoice_id: i64,
  quantity: i64,
  description: Option<String>,
  product_id: i64,
  product_name: String,
  product_description: Option<String>,
  product_price: String,
}

impl TryFrom<InvoiceLineRow> for InvoiceLine {
  type Error = RepositoryError;

  fn try_from(row: InvoiceLineRow) -> Result<Self, Self::Error> {
    Ok(InvoiceLine {
      id: row.id,
      invoice_id: row.invoice_id,
      product: Product {
        id: row.product_id,
        name: row.product_name,
        description: row.product_description,
        price: parse_decimal("product price", &row.product_price)?,
      },
      quantity: row.quantity,
      description: row.description,
    })
  }
}

const SELECT_INVOICES: &str = r#"
    SELECT id, uuid, number, additional_information, discount, penalty, paid,
           issue_date, due_date, remit_information_id, company_id, client_id
    FROM invoices
    WHERE (?1 IS NULL OR id = ?1)
    ORDER BY id
    "#;

const SELECT_LINES: &str = r#"
    SELECT il.id, il.invoice_id, il.quantity, il.description,
           p.id AS product_id, p.name AS product_name,
           p.description AS product_description, p.price AS product_price
    FROM invoice_lines il
    JOIN products p ON p.id = il.product_id
    WHERE (?1 IS NULL OR il.invoice_id = ?1)
    ORDER BY il.id
    "#;

/// Loads one invoice (`Some(id)`) or all of them (`None`) with every
/// relation resolved: lines with products, remit information with its
/// lines, issuing company and client.
async fn load_invoices(
  conn: &mut SqliteConnection,
  id: Option<i64>,
) -> Result<Vec<Invoice>, RepositoryError> {
  let rows = sqlx::query_as::<_, InvoiceRow>(SELECT_INVOICES)
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;
  if rows.is_empty() {
    return Ok(vec![]);
  }

  let line_rows = sqlx::query_as::<_, InvoiceLineRow>(SELECT_LINES)
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;
  let mut lines: HashMap<i64, Vec<InvoiceLine>> = HashMap::new();
  for row in line_rows {
    let line = InvoiceLine::try_from(row)?;
    lines.entry(line.invoice_id).or_default().push(line);
  }

  // A single invoice only needs its own relations; a listing loads them all.
  let remit_filter = id.and(rows.first().map(|row| row.remit_information_id));
  let remits: HashMap<i64, RemitInformation> = load_remit_informations(conn, remit_filter)
    .await?
    .into_iter()
    .map(|remit| (remit.id, remit))
    .collect();

  let company_filter = id.and(rows.first().map(|row| (row.company_id, row.client_id)));
  let companies: HashMap<i64, Company> = sqlx::query_as::<_, CompanyRow>(
    r#"
        SELECT id, name, document, address
        FROM companies
        WHERE (?1 IS NULL OR id = ?1 OR id = ?2)
        "#,
  )
  .bind(company_filter.map(|(company_id, _)| company_id))
  .bind(company_filter.map(|(_, client_id)| client_id))
  .fetch_all(&mut *conn)
  .await?
  .into_iter()
  .map(|row| {
    let company = Company::from(row);
    (company.id, company)
  })
  .collect();

  rows
    .into_iter()
    .map(|row| {
      let company = |company_id: i64| {
        companies.get(&company_id).cloned().ok_or_else(|| {
          RepositoryError::InvalidData(format!(
            "invoice {} references missing company {}",
            row.id, company_id
          ))
        })
      };

      Ok(Invoice {
        id: row.id,
        uuid: Uuid::parse_str(&row.uuid)
          .map_err(|e| RepositoryError::InvalidData(format!("uuid '{}': {}", row.uuid, e)))?,
        number: row.number,
        additional_information: row.additional_information.clone(),
        discount: parse_decimal("discount", &row.discount)?,
        penalty: parse_decimal("penalty", &row.penalty)?,
        paid: row.paid,
        issue_date: row.issue_date,
        due_date: row.due_date,
        remit_information: remits
          .get(&row.remit_information_id)
          .cloned()
          .ok_or_else(|| {
            RepositoryError::InvalidData(format!(
              "invoice {} references missing remit information {}",
              row.id, row.remit_information_id
            ))
          })?,
        company: company(row.company_id)?,
        client: company(row.client_id)?,
        lines: lines.remove(&row.id).unwrap_or_default(),
      })
    })
    .collect()
}

async fn insert_lines(
  conn: &mut SqliteConnection,
  invoice_id: i64,
  lines: &[InvoiceLineData],
) -> Result<(), RepositoryError> {
  for line in lines {
    sqlx::query(
      r#"
            INSERT INTO invoice_lines (invoice_id, product_id, quantity, description)
            VALUES (?1, ?2, ?3, ?4)
            "#,
    )
    .bind(invoice_id)
    .bind(line.product_id)
    .bind(line.quantity)
    .bind(&line.description)
    .execute(&mut *conn)
    .await?;
  }
  Ok(())
}

async fn load_one(conn: &mut SqliteConnection, id: i64) -> Result<Invoice, RepositoryError> {
  load_invoices(conn, Some(id))
    .await?
    .into_iter()
    .next()
    .ok_or(RepositoryError::not_found("Invoice", id))
}

#[async_trait]
impl InvoiceRepository for SqliteInvoiceRepository {
  async fn create(&self, data: InvoiceData) -> Result<Invoice, RepositoryError> {
    let uuid = data.supplied_uuid().unwrap_or_else(Uuid::new_v4);
    let issue_date = data.issue_date.unwrap_or_else(Utc::now);

    let mut tx = self.pool.begin().await?;

    let (id,): (i64,) = sqlx::query_as(
      r#"
            INSERT INTO invoices (
                uuid, number, additional_information, discount, penalty, paid,
                issue_date, due_date, remit_information_id, company_id, client_id
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            RETURNING id
            "#,
    )
    .bind(uuid.to_string())
    .bind(data.number)
    .bind(&data.additional_information)
    .bind(data.discount.to_string())
    .bind(data.penalty.to_string())
    .bind(data.paid)
    .bind(issue_date)
    .bind(data.due_date)
    .bind(data.remit_information_id)
    .bind(data.company_id)
    .bind(data.client_id)
    .fetch_one(&mut *tx)
    .await?;

    insert_lines(&mut tx, id, &data.lines).await?;
    let invoice = load_one(&mut tx, id).await?;

    tx.commit().await?;
    Ok(invoice)
  }

  async fn update(&self, id: i64, data: InvoiceData) -> Result<Option<Invoice>, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    // Identity and issue date stay as stored unless the request carries them.
    let updated: Option<(i64,)> = sqlx::query_as(
      r#"
            UPDATE invoices
            SET uuid = COALESCE(?2, uuid),
                number = ?3,
                additional_information = ?4,
                discount = ?5,
                penalty = ?6,
                paid = ?7,
                issue_date = COALESCE(?8, issue_date),
                due_date = ?9,
                remit_information_id = ?10,
                company_id = ?11,
                client_id = ?12
            WHERE id = ?1
            RETURNING id
            "#,
    )
    .bind(id)
    .bind(data.supplied_uuid().map(|uuid| uuid.to_string()))
    .bind(data.number)
    .bind(&data.additional_information)
    .bind(data.discount.to_string())
    .bind(data.penalty.to_string())
    .bind(data.paid)
    .bind(data.issue_date)
    .bind(data.due_date)
    .bind(data.remit_information_id)
    .bind(data.company_id)
    .bind(data.client_id)
    .fetch_optional(&mut *tx)
    .await?;

    if updated.is_none() {
      return Ok(None);
    }

    sqlx::query("DELETE FROM invoice_lines WHERE invoice_id = ?1")
      .bind(id)
      .execute(&mut *tx)
      .await?;
    insert_lines(&mut tx, id, &data.lines).await?;
    let invoice = load_one(&mut tx, id).await?;

    tx.commit().await?;
    Ok(Some(invoice))
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, RepositoryError> {
    let mut conn = self.pool.acquire().await?;
    Ok(load_invoices(&mut conn, Some(id)).await?.into_iter().next())
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, RepositoryError> {
    let mut conn = self.pool.acquire().await?;
    load_invoices(&mut conn, None).await
  }

  async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    sqlx::query("DELETE FROM invoice_lines WHERE invoice_id = ?1")
      .bind(id)
      .execute(&mut *tx)
      .await?;
    let result = sqlx::query("DELETE FROM invoices WHERE id = ?1")
      .bind(id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
  }
}
