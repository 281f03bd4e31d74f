//! Sink that writes accepted records to the structured log.
//!
//! Used when no database is configured. Records survive only as far as the
//! log pipeline keeps them.

use async_trait::async_trait;

use gateway_types::{SinkError, TransactionRecord, TransactionSink};

/// Log target for transaction records, so they can be routed separately.
pub const TRANSACTIONS_TARGET: &str = "transactions";

#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TransactionSink for LogSink {
    async fn append(&self, record: &TransactionRecord) -> Result<(), SinkError> {
        let payload =
            serde_json::to_string(record).map_err(|e| SinkError::Unavailable(e.to_string()))?;

        tracing::info!(
            target: TRANSACTIONS_TARGET,
            record_id = %record.id,
            record = %payload,
            "Transaction saved"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gateway_types::SaveTransactionRequest;
    use serde_json::json;

    #[tokio::test]
    async fn test_log_sink_accepts_records() {
        let record = TransactionRecord::from_request(
            &SaveTransactionRequest {
                payment_method: Some(json!("card_1")),
                amount: Some(json!(500)),
                currency: Some(json!("usd")),
                status: Some(json!("pending")),
                user_id: Some(json!("u1")),
                timestamp: None,
            },
            Utc::now(),
        )
        .unwrap();

        assert!(LogSink::new().append(&record).await.is_ok());
    }
}
