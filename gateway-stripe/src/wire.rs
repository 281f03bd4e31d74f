//! Stripe wire shapes and error mapping.

use reqwest::StatusCode;
use serde::Deserialize;

use gateway_types::{PaymentMethods, PaymentRequest, ProviderError, ProviderErrorKind};

/// The subset of a Stripe PaymentIntent the gateway reads.
#[derive(Debug, Deserialize)]
pub(crate) struct StripePaymentIntent {
    pub id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Form parameters for `POST /v1/payment_intents`.
pub(crate) fn intent_form(req: &PaymentRequest, methods: PaymentMethods) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("amount", req.amount_minor_units().to_string()),
        // Stripe expects lowercase ISO codes
        ("currency", req.currency().as_str().to_ascii_lowercase()),
    ];

    if let Some(description) = req.description() {
        form.push(("description", description.to_string()));
    }

    match methods {
        PaymentMethods::Automatic => {
            form.push(("automatic_payment_methods[enabled]", "true".to_string()));
        }
        PaymentMethods::Card => form.push(("payment_method_types[]", "card".to_string())),
    }

    form
}

/// Maps a non-2xx Stripe response onto a provider error, keeping Stripe's
/// own message whenever the body carries one.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> ProviderError {
    let parsed = serde_json::from_str::<StripeErrorEnvelope>(body).ok();
    let stripe_type = parsed.as_ref().and_then(|e| e.error.kind.as_deref());

    let kind = match (status, stripe_type) {
        (StatusCode::TOO_MANY_REQUESTS, _) => ProviderErrorKind::RateLimited,
        (StatusCode::UNAUTHORIZED, _) => ProviderErrorKind::Authentication,
        (_, Some("card_error")) => ProviderErrorKind::Declined,
        (_, Some("invalid_request_error")) => ProviderErrorKind::InvalidRequest,
        _ => ProviderErrorKind::Api,
    };

    let message = parsed
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| format!("payment provider returned HTTP {}", status.as_u16()));

    ProviderError::new(kind, message)
}

pub(crate) fn error_from_transport(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::new(ProviderErrorKind::Timeout, "payment provider request timed out")
    } else {
        ProviderError::new(
            ProviderErrorKind::Network,
            format!("could not reach payment provider: {}", err),
        )
    }
}
