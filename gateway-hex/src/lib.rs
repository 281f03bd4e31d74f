//! # Gateway Hex
//!
//! Application services and HTTP adapter for the payment intent gateway.
//!
//! ## Architecture
//!
//! - `service/` - Application services (IntentGateway, TransactionRecorder)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served next to the API
//!
//! The services are generic over `P: PaymentProvider` and `S: TransactionSink`,
//! allowing different adapters (or test doubles) to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{DEFAULT_PROVIDER_TIMEOUT, IntentGateway, TransactionRecorder};
