//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod handlers;
mod server;

pub use handlers::{ApiError, AppState, IDEMPOTENCY_KEY_HEADER};
pub use server::HttpServer;
