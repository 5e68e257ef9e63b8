//! Interactive order desk.
//!
//! Reads chat messages from stdin, one per line, and prints the bot reply
//! for each. Exits on EOF or an empty line, logging out of the Service
//! Layer on the way down.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use order_desk::adapters::erp::ServiceLayerClient;
use order_desk::adapters::oracle::{KeywordOracle, OllamaConfig, OllamaOracle};
use order_desk::application::{ConversationHandler, UnresolvedCustomerPolicy};
use order_desk::config::{AppConfig, OracleBackend};
use order_desk::ports::ExtractionOracle;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_desk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    tracing::info!(
        base_url = %config.erp.base_url,
        company_db = %config.erp.company_db,
        "connecting to Service Layer"
    );

    // A rejected login is fatal here. Retrying with the same credentials
    // cannot succeed, so surface it before reading any input.
    let client = Arc::new(ServiceLayerClient::connect((&config.erp).into()).await?);

    let oracle: Arc<dyn ExtractionOracle> = match config.oracle.backend {
        OracleBackend::Ollama => {
            let oracle_config = OllamaConfig::new(&config.oracle.base_url)
                .with_model(&config.oracle.model)
                .with_timeout(config.oracle.timeout());
            Arc::new(OllamaOracle::new(oracle_config))
        }
        OracleBackend::Keyword => Arc::new(KeywordOracle::new()),
    };
    tracing::info!(backend = oracle.backend_name(), "extraction backend ready");

    let policy = UnresolvedCustomerPolicy::from_config(&config.order)?;
    let handler =
        ConversationHandler::new(oracle, client.clone(), client.clone(), policy);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("Type an order request (blank line to quit).");
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            break;
        }
        let reply = handler.respond(text).await;
        println!("{reply}");
    }

    client.close().await;
    Ok(())
}
