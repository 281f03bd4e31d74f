//! IntentGateway and TransactionRecorder unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use gateway_types::{
        AppError, CreatePaymentIntentRequest, IdempotencyKey, IntentStatus, PaymentMethods,
        PaymentProvider, PaymentRequest, ProviderError, ProviderErrorKind, ProviderIntent,
        SaveTransactionRequest, SinkError, TransactionRecord, TransactionSink, ValidationError,
        validate,
    };

    use crate::{IntentGateway, TransactionRecorder};

    /// Provider double that echoes the idempotency key into the secret and
    /// remembers every call.
    pub struct MockProvider {
        calls: AtomicUsize,
        seen_methods: Mutex<Vec<PaymentMethods>>,
        behavior: Behavior,
    }

    pub enum Behavior {
        Succeed { status: &'static str },
        Reject(ProviderError),
        NoSecret,
        Hang,
    }

    impl MockProvider {
        pub fn new(behavior: Behavior) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen_methods: Mutex::new(Vec::new()),
                behavior,
            }
        }

        pub fn succeeding() -> Self {
            Self::new(Behavior::Succeed {
                status: "requires_payment_method",
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PaymentProvider for MockProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn create_intent(
            &self,
            req: &PaymentRequest,
            methods: PaymentMethods,
        ) -> Result<ProviderIntent, ProviderError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.seen_methods.lock().unwrap().push(methods);

            let id = match req.idempotency_key() {
                Some(key) => format!("pi_{}", key),
                None => format!("pi_{}", n),
            };

            match &self.behavior {
                Behavior::Succeed { status } => Ok(ProviderIntent {
                    client_secret: Some(format!("{}_secret", id)),
                    id,
                    status: status.to_string(),
                }),
                Behavior::Reject(err) => Err(err.clone()),
                Behavior::NoSecret => Ok(ProviderIntent {
                    id,
                    client_secret: None,
                    status: "requires_payment_method".into(),
                }),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    unreachable!("the gateway timeout fires first")
                }
            }
        }
    }

    /// Sink double recording appended records.
    pub struct MockSink {
        records: Mutex<Vec<TransactionRecord>>,
        fail: bool,
    }

    impl MockSink {
        pub fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn appended(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TransactionSink for MockSink {
        async fn append(&self, record: &TransactionRecord) -> Result<(), SinkError> {
            if self.fail {
                return Err(SinkError::Unavailable("connection refused".into()));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn payment(amount: i64, currency: &str) -> PaymentRequest {
        validate(&CreatePaymentIntentRequest {
            amount: Some(json!(amount)),
            currency: Some(json!(currency)),
            description: None,
        })
        .unwrap()
    }

    fn transaction() -> SaveTransactionRequest {
        SaveTransactionRequest {
            payment_method: Some(json!("card_1")),
            amount: Some(json!(500)),
            currency: Some(json!("usd")),
            status: Some(json!("completed")),
            user_id: Some(json!("u1")),
            timestamp: Some(json!("2024-01-01T00:00:00Z")),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // IntentGateway
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_intent_success() {
        let gateway = IntentGateway::new(MockProvider::succeeding());

        let result = gateway.create_intent(payment(1000, "usd")).await.unwrap();

        assert_eq!(result.client_secret(), "pi_1_secret");
        assert_eq!(result.status(), IntentStatus::RequiresPayment);
        assert_eq!(result.provider_intent_id(), "pi_1");
        assert_eq!(gateway.provider().calls(), 1);
    }

    #[tokio::test]
    async fn test_same_idempotency_key_yields_same_secret() {
        let gateway = IntentGateway::new(MockProvider::succeeding());
        let key = IdempotencyKey::parse("order-42").unwrap();

        let first = gateway
            .create_intent(payment(1000, "usd").with_idempotency_key(Some(key.clone())))
            .await
            .unwrap();
        let second = gateway
            .create_intent(payment(1000, "usd").with_idempotency_key(Some(key)))
            .await
            .unwrap();

        assert_eq!(first.client_secret(), second.client_secret());
        assert_eq!(first.client_secret(), "pi_order-42_secret");
    }

    #[tokio::test]
    async fn test_payment_methods_are_forwarded() {
        let gateway =
            IntentGateway::new(MockProvider::succeeding()).with_payment_methods(PaymentMethods::Card);

        gateway.create_intent(payment(1000, "usd")).await.unwrap();

        let seen = gateway.provider().seen_methods.lock().unwrap().clone();
        assert_eq!(seen, vec![PaymentMethods::Card]);
    }

    #[tokio::test]
    async fn test_default_payment_methods_are_automatic() {
        let gateway = IntentGateway::new(MockProvider::succeeding());

        gateway.create_intent(payment(1000, "usd")).await.unwrap();

        let seen = gateway.provider().seen_methods.lock().unwrap().clone();
        assert_eq!(seen, vec![PaymentMethods::Automatic]);
    }

    #[tokio::test]
    async fn test_provider_rejection_keeps_message_and_is_not_retried() {
        let gateway = IntentGateway::new(MockProvider::new(Behavior::Reject(ProviderError::new(
            ProviderErrorKind::Declined,
            "Your card was declined.",
        ))));

        let result = gateway.create_intent(payment(1000, "usd")).await;

        match result {
            Err(AppError::Provider(err)) => {
                assert_eq!(err.kind, ProviderErrorKind::Declined);
                assert_eq!(err.message, "Your card was declined.");
            }
            other => panic!("expected provider error, got {:?}", other),
        }
        assert_eq!(gateway.provider().calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_timeout_becomes_timeout_error() {
        let gateway = IntentGateway::new(MockProvider::new(Behavior::Hang))
            .with_timeout(Duration::from_millis(20));

        let result = gateway.create_intent(payment(1000, "usd")).await;

        assert!(matches!(
            result,
            Err(AppError::Provider(ProviderError {
                kind: ProviderErrorKind::Timeout,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_missing_client_secret_is_internal_error() {
        let gateway = IntentGateway::new(MockProvider::new(Behavior::NoSecret));

        let result = gateway.create_intent(payment(1000, "usd")).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_succeeded_status_is_normalized() {
        let gateway = IntentGateway::new(MockProvider::new(Behavior::Succeed {
            status: "succeeded",
        }));

        let result = gateway.create_intent(payment(1000, "usd")).await.unwrap();

        assert_eq!(result.status(), IntentStatus::Succeeded);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // TransactionRecorder
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_record_transaction_success() {
        let recorder = TransactionRecorder::new(MockSink::new());

        let record = recorder.record(transaction()).await.unwrap();

        assert_eq!(record.currency.as_str(), "USD");
        assert_eq!(record.user_id, "u1");
        assert_eq!(recorder.sink().appended(), 1);
        assert_eq!(recorder.sink().records.lock().unwrap()[0], record);
    }

    #[tokio::test]
    async fn test_missing_field_never_reaches_sink() {
        let recorder = TransactionRecorder::new(MockSink::new());

        let mut req = transaction();
        req.user_id = None;
        let result = recorder.record(req).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::Missing("userId")))
        ));
        assert_eq!(recorder.sink().appended(), 0);
    }

    #[tokio::test]
    async fn test_unknown_status_never_reaches_sink() {
        let recorder = TransactionRecorder::new(MockSink::new());

        let mut req = transaction();
        req.status = Some(json!("chargeback"));
        let result = recorder.record(req).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::UnknownStatus))
        ));
        assert_eq!(recorder.sink().appended(), 0);
    }

    #[tokio::test]
    async fn test_sink_failure_is_internal_error() {
        let recorder = TransactionRecorder::new(MockSink::failing());

        let result = recorder.record(transaction()).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
