//! Domain models for the payment intent gateway.

pub mod money;
pub mod payment;
pub mod transaction;

pub use money::CurrencyCode;
pub use payment::{
    IdempotencyKey, IntentStatus, PaymentIntentResult, PaymentMethods, PaymentRequest, validate,
};
pub use transaction::{TransactionRecord, TransactionRecordId, TransactionStatus};
