//! # Gateway Types
//!
//! Domain types and port traits for the payment intent gateway.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure value objects (PaymentRequest, PaymentIntentResult, TransactionRecord)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Validation, provider and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CurrencyCode, IdempotencyKey, IntentStatus, PaymentIntentResult, PaymentMethods,
    PaymentRequest, TransactionRecord, TransactionRecordId, TransactionStatus, validate,
};
pub use dto::*;
pub use error::{AppError, ProviderError, ProviderErrorKind, SinkError, ValidationError};
pub use ports::{PaymentProvider, ProviderIntent, TransactionSink};
