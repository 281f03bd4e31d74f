//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use gateway_types::PaymentMethods;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub provider_timeout: Duration,
    pub payment_methods: PaymentMethods,
    /// `None` keeps transaction records in the log only.
    pub database_url: Option<String>,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT must be a port number: {}", e))?;

        let stripe_secret_key = var("STRIPE_SECRET_KEY")
            .ok_or_else(|| anyhow::anyhow!("STRIPE_SECRET_KEY environment variable is required"))?;

        let stripe_api_base =
            var("STRIPE_API_BASE").unwrap_or_else(|| gateway_stripe::DEFAULT_API_BASE.to_string());

        let timeout_ms: u64 = var("PROVIDER_TIMEOUT_MS")
            .unwrap_or_else(|| "10000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("PROVIDER_TIMEOUT_MS must be milliseconds: {}", e))?;
        if timeout_ms == 0 {
            anyhow::bail!("PROVIDER_TIMEOUT_MS must be greater than zero");
        }

        let payment_methods = match var("PAYMENT_METHODS") {
            Some(raw) => raw
                .parse::<PaymentMethods>()
                .map_err(|e| anyhow::anyhow!(e))?,
            None => PaymentMethods::default(),
        };

        Ok(Self {
            port,
            stripe_secret_key,
            stripe_api_base,
            provider_timeout: Duration::from_millis(timeout_ms),
            payment_methods,
            database_url: var("DATABASE_URL"),
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}
