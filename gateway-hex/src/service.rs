//! Application Services
//!
//! Orchestrate the validated domain values through the provider and sink ports.
//! Contain NO infrastructure logic - pure orchestration.

use std::time::Duration;

use chrono::Utc;

use gateway_types::{
    AppError, IntentStatus, PaymentIntentResult, PaymentMethods, PaymentProvider, PaymentRequest,
    ProviderError, SaveTransactionRequest, TransactionRecord, TransactionSink,
};

/// Upper bound on a single provider call unless configured otherwise.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

// ─────────────────────────────────────────────────────────────────────────────
// Payment Intent Gateway
// ─────────────────────────────────────────────────────────────────────────────

/// Creates payment intents at the provider and normalizes the outcome.
///
/// Generic over `P: PaymentProvider` - the adapter is injected at compile time,
/// so tests run against stub providers without any network.
pub struct IntentGateway<P: PaymentProvider> {
    provider: P,
    methods: PaymentMethods,
    timeout: Duration,
}

impl<P: PaymentProvider> IntentGateway<P> {
    /// Creates a gateway with automatic payment methods and the default timeout.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            methods: PaymentMethods::default(),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_payment_methods(mut self, methods: PaymentMethods) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Creates one intent. Never retries: a failed call is reported as is and
    /// the caller may retry with the same idempotency key.
    #[tracing::instrument(
        skip(self, req),
        fields(
            provider = self.provider.name(),
            amount = req.amount_minor_units(),
            currency = %req.currency(),
            idempotent = req.idempotency_key().is_some(),
        )
    )]
    pub async fn create_intent(&self, req: PaymentRequest) -> Result<PaymentIntentResult, AppError> {
        let call = self.provider.create_intent(&req, self.methods);

        let intent = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(intent)) => intent,
            Ok(Err(err)) => {
                tracing::warn!(kind = %err.kind, "provider rejected intent: {}", err.message);
                return Err(err.into());
            }
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "provider call timed out");
                return Err(ProviderError::timeout(self.timeout).into());
            }
        };

        let Some(client_secret) = intent.client_secret else {
            tracing::error!(intent_id = %intent.id, "provider returned an intent without a client secret");
            return Err(AppError::Internal(format!(
                "intent {} has no client secret",
                intent.id
            )));
        };

        let status = IntentStatus::from_provider(&intent.status);
        tracing::info!(intent_id = %intent.id, ?status, "payment intent created");

        Ok(PaymentIntentResult::new(client_secret, status, intent.id))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction Recorder
// ─────────────────────────────────────────────────────────────────────────────

/// Validates client-reported transactions and appends them to the sink.
pub struct TransactionRecorder<S: TransactionSink> {
    sink: S,
}

impl<S: TransactionSink> TransactionRecorder<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Returns a reference to the underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Normalizes the report and stores it. The sink is only reached with a
    /// fully valid record.
    #[tracing::instrument(skip(self, req))]
    pub async fn record(&self, req: SaveTransactionRequest) -> Result<TransactionRecord, AppError> {
        let record = TransactionRecord::from_request(&req, Utc::now())?;

        self.sink.append(&record).await?;

        tracing::info!(
            record_id = %record.id,
            user_id = %record.user_id,
            status = %record.status,
            amount = record.amount_minor_units,
            currency = %record.currency,
            "transaction recorded"
        );

        Ok(record)
    }
}
