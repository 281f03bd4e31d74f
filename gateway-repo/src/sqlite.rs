//! SQLite sink adapter.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use gateway_types::{SinkError, TransactionRecord, TransactionSink};

const MIGRATION: &str = include_str!("../migrations/0001_create_transaction_records.sql");

/// Append-only SQLite table of transaction records.
pub struct SqliteSink {
    pool: SqlitePool,
}

impl SqliteSink {
    /// Opens (or creates) the database and applies the schema.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        for statement in MIGRATION.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&pool).await?;
        }

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TransactionSink for SqliteSink {
    async fn append(&self, record: &TransactionRecord) -> Result<(), SinkError> {
        sqlx::query(
            r#"INSERT INTO transaction_records
               (id, payment_method, amount, currency, status, user_id, occurred_at, recorded_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(record.id.to_string())
        .bind(&record.payment_method_id)
        .bind(record.amount_minor_units)
        .bind(record.currency.as_str())
        .bind(record.status.as_str())
        .bind(&record.user_id)
        .bind(record.occurred_at.to_rfc3339())
        .bind(record.recorded_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| SinkError::Database(e.to_string()))?;

        Ok(())
    }
}
