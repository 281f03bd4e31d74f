//! Payment intent domain model.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::money::{CurrencyCode, amount_field, currency_field};
use crate::dto::CreatePaymentIntentRequest;
use crate::error::ValidationError;

const MAX_DESCRIPTION_LEN: usize = 1000;
const MAX_IDEMPOTENCY_KEY_LEN: usize = 255;

/// Caller-supplied token forwarded to the provider so a repeated request
/// does not create a second intent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_IDEMPOTENCY_KEY_LEN {
            return Err(ValidationError::InvalidIdempotencyKey);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated request to collect money.
///
/// Can only be obtained through [`validate`], so holding one means the
/// amount is positive and the currency is well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    amount_minor_units: i64,
    currency: CurrencyCode,
    description: Option<String>,
    idempotency_key: Option<IdempotencyKey>,
}

impl PaymentRequest {
    /// Amount in the smallest currency unit.
    pub fn amount_minor_units(&self) -> i64 {
        self.amount_minor_units
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn idempotency_key(&self) -> Option<&IdempotencyKey> {
        self.idempotency_key.as_ref()
    }

    /// Attaches the idempotency key taken from the request headers.
    pub fn with_idempotency_key(mut self, key: Option<IdempotencyKey>) -> Self {
        self.idempotency_key = key;
        self
    }
}

/// Validates an untyped payment-intent body.
///
/// Pure and deterministic: no IO happens here, so a failure short-circuits
/// before the provider is ever contacted.
pub fn validate(req: &CreatePaymentIntentRequest) -> Result<PaymentRequest, ValidationError> {
    let amount = amount_field(req.amount.as_ref())?;
    if amount <= 0 {
        return Err(ValidationError::NonPositiveAmount);
    }

    let currency = currency_field(req.currency.as_ref())?;

    let description = match req.description.as_ref() {
        None => None,
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => {
            if s.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(ValidationError::TooLong {
                    field: "description",
                    max: MAX_DESCRIPTION_LEN,
                });
            }
            Some(s.trim().to_string())
        }
        Some(_) => return Err(ValidationError::NotAString("description")),
    };

    Ok(PaymentRequest {
        amount_minor_units: amount,
        currency,
        description,
        idempotency_key: None,
    })
}

/// Which payment methods the provider should offer for an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethods {
    /// Let the provider negotiate methods (dashboard-configured).
    #[default]
    Automatic,
    /// Card only, the legacy behavior.
    Card,
}

impl std::str::FromStr for PaymentMethods {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automatic" => Ok(Self::Automatic),
            "card" => Ok(Self::Card),
            other => Err(format!(
                "unknown payment method mode '{}', expected 'automatic' or 'card'",
                other
            )),
        }
    }
}

/// Normalized state of a payment intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPayment,
    Succeeded,
    Failed,
    Unknown,
}

impl IntentStatus {
    /// Maps a provider status string onto the service's own status set.
    pub fn from_provider(status: &str) -> Self {
        match status {
            "requires_payment_method" | "requires_confirmation" | "requires_action" => {
                Self::RequiresPayment
            }
            "succeeded" => Self::Succeeded,
            "canceled" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

/// Outcome of a successful intent creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentResult {
    client_secret: String,
    status: IntentStatus,
    provider_intent_id: String,
}

impl PaymentIntentResult {
    pub fn new(
        client_secret: impl Into<String>,
        status: IntentStatus,
        provider_intent_id: impl Into<String>,
    ) -> Self {
        Self {
            client_secret: client_secret.into(),
            status,
            provider_intent_id: provider_intent_id.into(),
        }
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn status(&self) -> IntentStatus {
        self.status
    }

    /// Provider-side identifier. For logs only, never returned to callers.
    pub fn provider_intent_id(&self) -> &str {
        &self.provider_intent_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(amount: serde_json::Value, currency: serde_json::Value) -> CreatePaymentIntentRequest {
        CreatePaymentIntentRequest {
            amount: Some(amount),
            currency: Some(currency),
            description: None,
        }
    }

    #[test]
    fn test_validate_success_normalizes_currency() {
        let req = validate(&body(json!(1000), json!("usd"))).unwrap();
        assert_eq!(req.amount_minor_units(), 1000);
        assert_eq!(req.currency().as_str(), "USD");
        assert_eq!(req.description(), None);
        assert_eq!(req.idempotency_key(), None);
    }

    #[test]
    fn test_zero_amount_fails() {
        let result = validate(&body(json!(0), json!("usd")));
        assert_eq!(result, Err(ValidationError::NonPositiveAmount));
    }

    #[test]
    fn test_negative_amounts_fail() {
        for amount in [-1, -5, i64::MIN] {
            let result = validate(&body(json!(amount), json!("usd")));
            assert_eq!(result, Err(ValidationError::NonPositiveAmount));
        }
    }

    #[test]
    fn test_missing_amount_fails() {
        let req = CreatePaymentIntentRequest {
            amount: None,
            currency: Some(json!("usd")),
            description: None,
        };
        assert_eq!(validate(&req), Err(ValidationError::Missing("amount")));
    }

    #[test]
    fn test_fractional_amount_fails() {
        let result = validate(&body(json!(10.5), json!("usd")));
        assert_eq!(result, Err(ValidationError::NotAnInteger("amount")));
    }

    #[test]
    fn test_bad_currency_shapes_fail() {
        for currency in [
            json!("US"),
            json!("dollars"),
            json!("12a"),
            json!(840),
            json!(" usd"),
            json!("usd "),
            json!("u sd"),
        ] {
            let result = validate(&body(json!(100), currency));
            assert_eq!(result, Err(ValidationError::InvalidCurrency));
        }
    }

    #[test]
    fn test_missing_currency_fails() {
        let req = CreatePaymentIntentRequest {
            amount: Some(json!(100)),
            currency: None,
            description: None,
        };
        assert_eq!(validate(&req), Err(ValidationError::Missing("currency")));
    }

    #[test]
    fn test_amount_checked_before_currency() {
        let result = validate(&body(json!(-5), json!("US")));
        assert_eq!(result, Err(ValidationError::NonPositiveAmount));
    }

    #[test]
    fn test_description_is_trimmed_and_optional() {
        let mut req = body(json!(100), json!("eur"));
        req.description = Some(json!("  Order #42 "));
        assert_eq!(validate(&req).unwrap().description(), Some("Order #42"));

        req.description = Some(json!("   "));
        assert_eq!(validate(&req).unwrap().description(), None);

        req.description = Some(json!(42));
        assert_eq!(
            validate(&req),
            Err(ValidationError::NotAString("description"))
        );
    }

    #[test]
    fn test_description_too_long_fails() {
        let mut req = body(json!(100), json!("eur"));
        req.description = Some(json!("x".repeat(MAX_DESCRIPTION_LEN + 1)));
        assert!(matches!(
            validate(&req),
            Err(ValidationError::TooLong { field: "description", .. })
        ));
    }

    #[test]
    fn test_idempotency_key_bounds() {
        assert!(IdempotencyKey::parse("order-42").is_ok());
        assert_eq!(
            IdempotencyKey::parse("  "),
            Err(ValidationError::InvalidIdempotencyKey)
        );
        assert_eq!(
            IdempotencyKey::parse(&"k".repeat(256)),
            Err(ValidationError::InvalidIdempotencyKey)
        );
    }

    #[test]
    fn test_payment_methods_from_str() {
        assert_eq!("automatic".parse::<PaymentMethods>(), Ok(PaymentMethods::Automatic));
        assert_eq!("CARD".parse::<PaymentMethods>(), Ok(PaymentMethods::Card));
        assert!("paypal".parse::<PaymentMethods>().is_err());
    }

    #[test]
    fn test_intent_status_mapping() {
        assert_eq!(
            IntentStatus::from_provider("requires_payment_method"),
            IntentStatus::RequiresPayment
        );
        assert_eq!(
            IntentStatus::from_provider("requires_action"),
            IntentStatus::RequiresPayment
        );
        assert_eq!(
            IntentStatus::from_provider("succeeded"),
            IntentStatus::Succeeded
        );
        assert_eq!(IntentStatus::from_provider("canceled"), IntentStatus::Failed);
        assert_eq!(
            IntentStatus::from_provider("processing"),
            IntentStatus::Unknown
        );
    }
}
