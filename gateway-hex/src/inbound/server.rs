//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gateway_types::{PaymentProvider, TransactionSink};

use super::handlers::{self, AppState};
use crate::openapi::ApiDoc;
use crate::{IntentGateway, TransactionRecorder};

/// HTTP Server for the payment intent gateway.
pub struct HttpServer<P: PaymentProvider, S: TransactionSink> {
    state: Arc<AppState<P, S>>,
}

impl<P: PaymentProvider, S: TransactionSink> HttpServer<P, S> {
    /// Creates a new HTTP server around the gateway/recorder pair.
    pub fn new(gateway: IntentGateway<P>, recorder: TransactionRecorder<S>) -> Self {
        Self {
            state: Arc::new(AppState { gateway, recorder }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/", get(handlers::banner))
            .route("/health", get(handlers::health))
            .route(
                "/payment-intents",
                post(handlers::create_payment_intent::<P, S>),
            )
            .route("/transactions", post(handlers::save_transaction::<P, S>))
            // Paths used by the earlier servers, kept for existing clients
            .route(
                "/create-payment-intent",
                post(handlers::create_payment_intent::<P, S>),
            )
            .route(
                "/save-transaction",
                post(handlers::save_transaction::<P, S>),
            )
            .with_state(self.state.clone())
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(metrics)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
