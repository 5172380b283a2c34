//! SQLite adapters for the record repositories

mod company_repository;
mod invoice_repository;
mod product_repository;
mod remit_information_repository;
mod user_repository;

pub use company_repository::SqliteCompanyRepository;
pub use invoice_repository::SqliteInvoiceRepository;
pub use product_repository::SqliteProductRepository;
pub use remit_information_repository::SqliteRemitInformationRepository;
pub use user_repository::SqliteUserRepository;

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::domain::errors::RepositoryError;
use crate::infrastructure::config::DatabaseConfig;

/// Opens the configured database, creating the file when missing.
/// Foreign keys are switched on for every connection.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
  let options = SqliteConnectOptions::from_str(&config.url)?
    .create_if_missing(true)
    .foreign_keys(true);

  SqlitePoolOptions::new()
    .max_connections(config.max_connections)
    .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
    .connect_with(options)
    .await
}

/// Private in-memory database on a single pinned connection.
///
/// Every connection to `sqlite::memory:` gets its own database, so the
/// pool must never open a second one or drop the first.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
  let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

  SqlitePoolOptions::new()
    .max_connections(1)
    .min_connections(1)
    .idle_timeout(None)
    .max_lifetime(None)
    .connect_with(options)
    .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
  sqlx::migrate!("./migrations").run(pool).await
}

pub(crate) fn parse_decimal(field: &str, value: &str) -> Result<Decimal, RepositoryError> {
  Decimal::from_str(value)
    .map_err(|e| RepositoryError::InvalidData(format!("{} '{}': {}", field, value, e)))
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
  let pool = connect_in_memory().await.unwrap();
  run_migrations(&pool).await.unwrap();
  pool
}
