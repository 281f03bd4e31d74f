//! # Gateway Client SDK
//!
//! A typed Rust client for the payment intent gateway.

use gateway_types::{
    CreatePaymentIntentRequest, HealthResponse, PaymentIntentResponse, SaveTransactionRequest,
    SaveTransactionResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Header carrying the caller's idempotency key.
const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Payment intent gateway client.
pub struct GatewayClient {
    base_url: String,
    http: Client,
}

impl GatewayClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the gateway is up.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Ok(false);
        }
        let body: HealthResponse = resp.json().await?;
        Ok(body.status == "ok")
    }

    /// Creates a payment intent and returns its client secret.
    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        description: Option<String>,
        idempotency_key: Option<String>,
    ) -> Result<PaymentIntentResponse, ClientError> {
        let body = CreatePaymentIntentRequest {
            amount: Some(amount.into()),
            currency: Some(currency.into()),
            description: description.map(Into::into),
        };

        let mut req = self
            .http
            .post(format!("{}/payment-intents", self.base_url))
            .json(&body);
        if let Some(key) = idempotency_key {
            req = req.header(IDEMPOTENCY_KEY_HEADER, key);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    /// Reports a transaction outcome.
    pub async fn save_transaction(
        &self,
        request: &SaveTransactionRequest,
    ) -> Result<SaveTransactionResponse, ClientError> {
        let resp = self
            .http
            .post(format!("{}/transactions", self.base_url))
            .json(request)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
