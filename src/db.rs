// src/db.rs

use crate::errors::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Migrations embedded from `migrations/` at compile time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Build the SQLite pool the service runs against.
///
/// Foreign keys are switched on explicitly: an order item must not outlive
/// its order, and the pragma backs up the service-level existence checks.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
  let options = SqliteConnectOptions::from_str(database_url)?
    .create_if_missing(true)
    .foreign_keys(true)
    .journal_mode(SqliteJournalMode::Wal);

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect_with(options)
    .await?;

  Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
  MIGRATOR
    .run(pool)
    .await
    .map_err(|e| crate::errors::AppError::Internal(format!("Migration failed: {}", e)))?;
  Ok(())
}
