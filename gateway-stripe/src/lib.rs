//! # Gateway Stripe
//!
//! Outbound adapter implementing the `PaymentProvider` port against the
//! Stripe REST API.

mod wire;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use gateway_types::{
    PaymentMethods, PaymentProvider, PaymentRequest, ProviderError, ProviderErrorKind,
    ProviderIntent,
};

use wire::{StripePaymentIntent, error_from_response, error_from_transport, intent_form};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Connection settings for the Stripe adapter.
#[derive(Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base: String,
    /// Per-request transport timeout.
    pub timeout: Duration,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Stripe payment provider.
///
/// Holds one pooled `reqwest::Client`, safe to share across requests.
pub struct StripeProvider {
    http: Client,
    secret_key: String,
    intents_url: String,
}

impl StripeProvider {
    /// Builds the HTTP client with the configured timeout.
    pub fn new(config: StripeConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            secret_key: config.secret_key,
            intents_url: format!(
                "{}/v1/payment_intents",
                config.api_base.trim_end_matches('/')
            ),
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    fn name(&self) -> &'static str {
        "stripe"
    }

    async fn create_intent(
        &self,
        req: &PaymentRequest,
        methods: PaymentMethods,
    ) -> Result<ProviderIntent, ProviderError> {
        let mut call = self
            .http
            .post(&self.intents_url)
            .bearer_auth(&self.secret_key)
            .form(&intent_form(req, methods));

        if let Some(key) = req.idempotency_key() {
            call = call.header("Idempotency-Key", key.as_str());
        }

        let resp = call.send().await.map_err(error_from_transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "stripe rejected payment intent");
            return Err(error_from_response(status, &body));
        }

        let intent: StripePaymentIntent = resp.json().await.map_err(|e| {
            ProviderError::new(
                ProviderErrorKind::Api,
                format!("unreadable payment provider response: {}", e),
            )
        })?;

        Ok(ProviderIntent {
            id: intent.id,
            client_secret: intent.client_secret,
            status: intent.status,
        })
    }
}
