//! # Gateway Repository
//!
//! Concrete sink implementations (adapters) for the payment intent gateway.
//! Every adapter implements the `TransactionSink` port:
//! - `LogSink` - structured log events, always available
//! - `SqliteSink` - behind the `sqlite` feature
//! - `PostgresSink` - behind the `postgres` feature

use async_trait::async_trait;
use gateway_types::{SinkError, TransactionRecord, TransactionSink};

pub mod log_sink;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use log_sink::LogSink;
#[cfg(feature = "postgres")]
pub use postgres::PostgresSink;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSink;

/// Unified sink selected at startup from configuration.
pub enum Sink {
    Log(LogSink),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteSink),
    #[cfg(feature = "postgres")]
    Postgres(PostgresSink),
}

impl Sink {
    /// Short adapter name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Sink::Log(_) => "log",
            #[cfg(feature = "sqlite")]
            Sink::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Sink::Postgres(_) => "postgres",
        }
    }
}

/// Build and initialize a sink from an optional database URL.
///
/// - no URL: records go to the log
/// - `sqlite:` URL: SQLite (requires the `sqlite` feature)
/// - `postgres:` / `postgresql:` URL: PostgreSQL (requires the `postgres` feature)
///
/// SQL sinks connect and create their table before returning.
///
/// # Examples
///
/// ```ignore
/// let sink = build_sink(None).await?;
/// let sink = build_sink(Some("sqlite://data/transactions.db?mode=rwc")).await?;
/// ```
pub async fn build_sink(database_url: Option<&str>) -> anyhow::Result<Sink> {
    let Some(url) = database_url.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(Sink::Log(LogSink::new()));
    };

    if url.starts_with("sqlite:") {
        #[cfg(feature = "sqlite")]
        return Ok(Sink::Sqlite(SqliteSink::new(url).await?));
        #[cfg(not(feature = "sqlite"))]
        anyhow::bail!("DATABASE_URL is a SQLite URL but the `sqlite` feature is not enabled");
    }

    if url.starts_with("postgres:") || url.starts_with("postgresql:") {
        #[cfg(feature = "postgres")]
        return Ok(Sink::Postgres(PostgresSink::new(url).await?));
        #[cfg(not(feature = "postgres"))]
        anyhow::bail!("DATABASE_URL is a Postgres URL but the `postgres` feature is not enabled");
    }

    anyhow::bail!("unsupported DATABASE_URL scheme, expected sqlite: or postgres:")
}

#[async_trait]
impl TransactionSink for Sink {
    async fn append(&self, record: &TransactionRecord) -> Result<(), SinkError> {
        match self {
            Sink::Log(sink) => sink.append(record).await,
            #[cfg(feature = "sqlite")]
            Sink::Sqlite(sink) => sink.append(record).await,
            #[cfg(feature = "postgres")]
            Sink::Postgres(sink) => sink.append(record).await,
        }
    }
}
