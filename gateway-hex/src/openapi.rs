//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use gateway_types::domain::{IntentStatus, TransactionRecord, TransactionStatus};
use gateway_types::dto::{
    CreatePaymentIntentRequest, ErrorResponse, HealthResponse, PaymentIntentResponse,
    SaveTransactionRequest, SaveTransactionResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse, example = json!({"status": "ok"}))
    )
)]
async fn health() {}

/// Create a payment intent
#[utoipa::path(
    post,
    path = "/payment-intents",
    tag = "payment-intents",
    request_body = CreatePaymentIntentRequest,
    params(
        ("Idempotency-Key" = Option<String>, Header, description = "Forwarded to the provider; repeats return the same intent")
    ),
    responses(
        (status = 200, description = "Intent created", body = PaymentIntentResponse),
        (status = 400, description = "Invalid amount, currency or body", body = ErrorResponse),
        (status = 502, description = "Payment provider rejected or failed the call", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn create_payment_intent() {}

/// Record a client-reported transaction
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    request_body = SaveTransactionRequest,
    responses(
        (status = 200, description = "Transaction accepted", body = SaveTransactionResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn save_transaction() {}

/// OpenAPI documentation for the gateway API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payment Intent Gateway API",
        version = "1.0.0",
        description = "Creates payment intents at the payment provider and records client-reported transaction outcomes.\n\nAll failures return `{\"error\": \"<message>\"}`.",
        license(name = "MIT"),
    ),
    paths(health, create_payment_intent, save_transaction),
    components(
        schemas(
            CreatePaymentIntentRequest,
            PaymentIntentResponse,
            SaveTransactionRequest,
            SaveTransactionResponse,
            TransactionRecord,
            TransactionStatus,
            IntentStatus,
            HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness probing"),
        (name = "payment-intents", description = "Payment intent creation"),
        (name = "transactions", description = "Transaction outcome recording"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_public_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/payment-intents", "/transactions"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
