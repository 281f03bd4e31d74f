//! Payment provider port.
//!
//! Implementations talk to a real provider (Stripe) or are test doubles.

use crate::domain::{PaymentMethods, PaymentRequest};
use crate::error::ProviderError;

/// The provider's view of a freshly created intent.
///
/// This is provider schema and stays inside the service; only the client
/// secret and a normalized status ever leave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIntent {
    pub id: String,
    pub client_secret: Option<String>,
    pub status: String,
}

/// Port trait for payment providers.
///
/// Implementations must be safe to call concurrently and must not retry on
/// their own. The idempotency key on the request is forwarded as-is.
#[async_trait::async_trait]
pub trait PaymentProvider: Send + Sync + 'static {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Creates a payment intent for an already validated request.
    async fn create_intent(
        &self,
        req: &PaymentRequest,
        methods: PaymentMethods,
    ) -> Result<ProviderIntent, ProviderError>;
}
