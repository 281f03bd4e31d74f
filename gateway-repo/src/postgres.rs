//! PostgreSQL sink adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use gateway_types::{SinkError, TransactionRecord, TransactionSink};

const MIGRATION: &str = include_str!("../migrations/0001_create_transaction_records_pg.sql");

/// Append-only PostgreSQL table of transaction records.
pub struct PostgresSink {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> anyhow::Result<()> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresSink {
    /// Connects and applies the schema.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        execute_migration(&pool, MIGRATION, "0001").await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TransactionSink for PostgresSink {
    async fn append(&self, record: &TransactionRecord) -> Result<(), SinkError> {
        sqlx::query(
            r#"INSERT INTO transaction_records
               (id, payment_method, amount, currency, status, user_id, occurred_at, recorded_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(*record.id.as_uuid())
        .bind(&record.payment_method_id)
        .bind(record.amount_minor_units)
        .bind(record.currency.as_str())
        .bind(record.status.as_str())
        .bind(&record.user_id)
        .bind(record.occurred_at)
        .bind(record.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SinkError::Database(e.to_string()))?;

        Ok(())
    }
}
