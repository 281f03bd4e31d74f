//! Error types for the payment intent gateway.

use std::fmt;
use std::time::Duration;

/// Client input errors. Always surfaced as 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be an integer")]
    NotAnInteger(&'static str),

    #[error("{0} must be a string")]
    NotAString(&'static str),

    #[error("amount must be positive")]
    NonPositiveAmount,

    #[error("amount must not be negative")]
    NegativeAmount,

    #[error("currency must be a 3-letter ISO-4217 code")]
    InvalidCurrency,

    #[error("status must be one of pending, completed, failed")]
    UnknownStatus,

    #[error("timestamp must be an RFC 3339 datetime")]
    InvalidTimestamp,

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Idempotency-Key must be between 1 and 255 characters")]
    InvalidIdempotencyKey,

    #[error("invalid request body: {0}")]
    MalformedBody(String),
}

/// Category of a payment provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The card or payment method was declined.
    Declined,
    /// The provider rejected the request parameters (e.g. unsupported currency).
    InvalidRequest,
    RateLimited,
    /// The provider did not accept our credentials.
    Authentication,
    /// Transport-level failure talking to the provider.
    Network,
    /// The provider did not answer within the configured bound.
    Timeout,
    /// Any other provider-side failure.
    Api,
}

impl ProviderErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Declined => "declined",
            Self::InvalidRequest => "invalid_request",
            Self::RateLimited => "rate_limited",
            Self::Authentication => "authentication",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Api => "api",
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payment provider rejected or failed the call.
///
/// The provider's own message is preserved verbatim for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(
            ProviderErrorKind::Timeout,
            format!(
                "payment provider did not respond within {}ms",
                after.as_millis()
            ),
        )
    }
}

/// Persistence sink failures.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SinkError> for AppError {
    fn from(err: SinkError) -> Self {
        AppError::Internal(err.to_string())
    }
}
