//! Transaction record domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::money::{CurrencyCode, amount_field, currency_field, string_field};
use crate::dto::SaveTransactionRequest;
use crate::error::ValidationError;

/// Unique identifier for a TransactionRecord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionRecordId(Uuid);

impl TransactionRecordId {
    /// Creates a new random TransactionRecordId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransactionRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-reported outcome of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ValidationError::UnknownStatus),
        }
    }
}

/// A normalized, append-only record of a client-reported transaction.
///
/// Records are never updated or deleted once handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[schema(value_type = String, format = Uuid)]
    pub id: TransactionRecordId,
    /// Provider payment method identifier
    #[serde(rename = "paymentMethod")]
    #[schema(example = "card_1")]
    pub payment_method_id: String,
    /// Amount in smallest currency unit
    #[serde(rename = "amount")]
    #[schema(example = 500)]
    pub amount_minor_units: i64,
    #[schema(value_type = String, example = "USD")]
    pub currency: CurrencyCode,
    pub status: TransactionStatus,
    #[schema(example = "u1")]
    pub user_id: String,
    /// When the transaction happened, as reported by the client
    #[serde(rename = "timestamp")]
    pub occurred_at: DateTime<Utc>,
    /// When this service accepted the record
    pub recorded_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Validates and normalizes an untyped transaction report.
    ///
    /// `now` stamps `recordedAt`, and `timestamp` when the client omitted it.
    pub fn from_request(
        req: &SaveTransactionRequest,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let payment_method_id = string_field("paymentMethod", req.payment_method.as_ref())?;

        let amount = amount_field(req.amount.as_ref())?;
        if amount < 0 {
            return Err(ValidationError::NegativeAmount);
        }

        let currency = currency_field(req.currency.as_ref())?;
        let status: TransactionStatus = string_field("status", req.status.as_ref())?.parse()?;
        let user_id = string_field("userId", req.user_id.as_ref())?;
        let occurred_at = occurred_at(req.timestamp.as_ref(), now)?;

        Ok(Self {
            id: TransactionRecordId::new(),
            payment_method_id,
            amount_minor_units: amount,
            currency,
            status,
            user_id,
            occurred_at,
            recorded_at: now,
        })
    }
}

fn occurred_at(value: Option<&Value>, now: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
    match value {
        None => Ok(now),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ValidationError::InvalidTimestamp),
        Some(_) => Err(ValidationError::InvalidTimestamp),
    }
}
