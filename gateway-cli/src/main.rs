//! Gateway CLI
//!
//! Command-line interface for the payment intent gateway.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;

use gateway_client::GatewayClient;
use gateway_types::SaveTransactionRequest;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(author, version, about = "Payment intent gateway CLI client", long_about = None)]
struct Cli {
    /// Base URL of the gateway
    #[arg(long, env = "GATEWAY_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Payment intent operations
    Intent {
        #[command(subcommand)]
        action: IntentCommands,
    },
    /// Transaction operations
    Transaction {
        #[command(subcommand)]
        action: TransactionCommands,
    },
    /// Check gateway health
    Health,
}

#[derive(Subcommand)]
enum IntentCommands {
    /// Create a payment intent and print its client secret
    Create {
        /// Amount in smallest currency unit (e.g. cents)
        #[arg(long)]
        amount: i64,
        /// Three-letter currency code
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        idempotency_key: Option<String>,
    },
}

#[derive(Subcommand)]
enum TransactionCommands {
    /// Report a transaction outcome
    Save {
        #[arg(long)]
        payment_method: String,
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "USD")]
        currency: String,
        /// pending, completed or failed
        #[arg(long)]
        status: String,
        #[arg(long)]
        user_id: String,
        /// RFC 3339 datetime, defaults to the time the gateway receives it
        #[arg(long)]
        timestamp: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = GatewayClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ Gateway is healthy");
            } else {
                println!("✗ Gateway is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Intent { action } => match action {
            IntentCommands::Create {
                amount,
                currency,
                description,
                idempotency_key,
            } => {
                let intent = client
                    .create_payment_intent(amount, &currency, description, idempotency_key)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&intent)?);
            }
        },

        Commands::Transaction { action } => match action {
            TransactionCommands::Save {
                payment_method,
                amount,
                currency,
                status,
                user_id,
                timestamp,
            } => {
                let request = SaveTransactionRequest {
                    payment_method: Some(Value::from(payment_method)),
                    amount: Some(Value::from(amount)),
                    currency: Some(Value::from(currency)),
                    status: Some(Value::from(status)),
                    user_id: Some(Value::from(user_id)),
                    timestamp: timestamp.map(Value::from),
                };
                let saved = client.save_transaction(&request).await?;
                println!("{}", serde_json::to_string_pretty(&saved.record)?);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_intent_create() {
        let cli = Cli::try_parse_from([
            "gateway",
            "--api-url",
            "http://gw:8080",
            "intent",
            "create",
            "--amount",
            "1000",
            "--currency",
            "eur",
            "--idempotency-key",
            "order-42",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://gw:8080");
        match cli.command {
            Commands::Intent {
                action:
                    IntentCommands::Create {
                        amount,
                        currency,
                        description,
                        idempotency_key,
                    },
            } => {
                assert_eq!(amount, 1000);
                assert_eq!(currency, "eur");
                assert!(description.is_none());
                assert_eq!(idempotency_key.as_deref(), Some("order-42"));
            }
            _ => panic!("expected intent create"),
        }
    }

    #[test]
    fn test_transaction_save_requires_user_id() {
        let result = Cli::try_parse_from([
            "gateway",
            "transaction",
            "save",
            "--payment-method",
            "card_1",
            "--amount",
            "500",
            "--status",
            "completed",
        ]);
        assert!(result.is_err());
    }
}
