//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Request bodies keep their fields as raw JSON values: the shape is checked
//! by the domain validators, not by the deserializer, so a wrong type turns
//! into a precise validation message instead of a generic decode failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::TransactionRecord;

// ─────────────────────────────────────────────────────────────────────────────
// Payment intent DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a payment intent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentIntentRequest {
    /// Amount in smallest currency unit (e.g., cents)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = i64, example = 1000)]
    pub amount: Option<Value>,
    /// Three-letter ISO-4217 currency code, any case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String, example = "usd")]
    pub currency: Option<Value>,
    /// Optional description shown on the provider dashboard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "Order #42")]
    pub description: Option<Value>,
}

/// Response after creating a payment intent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    /// Opaque token the client uses to complete the payment
    #[schema(example = "pi_123_secret_456")]
    pub client_secret: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Client report of a transaction outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveTransactionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String, example = "card_1")]
    pub payment_method: Option<Value>,
    /// Amount in smallest currency unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = i64, example = 500)]
    pub amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String, example = "USD")]
    pub currency: Option<Value>,
    /// One of `pending`, `completed`, `failed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String, example = "completed")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String, example = "u1")]
    pub user_id: Option<Value>,
    /// RFC 3339 datetime; defaults to the time of receipt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "2024-01-01T00:00:00Z")]
    pub timestamp: Option<Value>,
}

/// Response after a transaction was accepted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveTransactionResponse {
    pub success: bool,
    /// The normalized record as it was handed to storage
    pub record: TransactionRecord,
}

// ─────────────────────────────────────────────────────────────────────────────
// Health & errors
// ─────────────────────────────────────────────────────────────────────────────

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "amount must be positive")]
    pub error: String,
}
