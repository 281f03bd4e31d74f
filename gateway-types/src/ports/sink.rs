//! Persistence sink port.
//!
//! A database, a log stream or a queue all satisfy this contract.

use crate::domain::TransactionRecord;
use crate::error::SinkError;

/// Append-only destination for accepted transaction records.
#[async_trait::async_trait]
pub trait TransactionSink: Send + Sync + 'static {
    /// Stores one record. Records are never updated or removed.
    async fn append(&self, record: &TransactionRecord) -> Result<(), SinkError>;
}
