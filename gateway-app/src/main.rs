//! # Payment Intent Gateway Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the Stripe provider and the transaction sink
//! - Create the gateway and recorder services
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_hex::{IntentGateway, TransactionRecorder, inbound::HttpServer};
use gateway_repo::build_sink;
use gateway_stripe::{StripeConfig, StripeProvider};

const DEFAULT_LOG_FILTER: &str = "info,gateway_app=debug,gateway_hex=debug";

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    use opentelemetry_otlp::WithExportConfig;

    global::set_text_map_propagator(TraceContextPropagator::new());

    // gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("payment-intent-gateway"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = config::Config::from_env()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    // OpenTelemetry export only when a collector is configured
    let otel_provider = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => {
            let (otel_tracer, otel_provider) = init_tracer(endpoint)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .with(tracing_opentelemetry::layer().with_tracer(otel_tracer))
                .init();
            Some(otel_provider)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            None
        }
    };

    tracing::info!("Starting payment intent gateway on port {}", config.port);

    let mut stripe = StripeConfig::new(config.stripe_secret_key.clone());
    stripe.api_base = config.stripe_api_base.clone();
    stripe.timeout = config.provider_timeout;
    tracing::debug!(?stripe, "Stripe provider configured");
    let provider = StripeProvider::new(stripe)?;

    // Build sink (handles connection and migration)
    let sink = build_sink(config.database_url.as_deref()).await?;
    tracing::info!(sink = sink.kind(), "Transaction sink ready");

    let gateway = IntentGateway::new(provider)
        .with_payment_methods(config.payment_methods)
        .with_timeout(config.provider_timeout);
    let recorder = TransactionRecorder::new(sink);

    // Create and run the HTTP server
    let server = HttpServer::new(gateway, recorder);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
