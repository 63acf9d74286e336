//! spam-rs: SMS spam detection server
//!
//! Loads the trained artifact pair and serves the prediction form and the
//! JSON API. Fails before binding a socket if the artifacts cannot be loaded.

use clap::Parser;
use spam_rs::api::ApiServer;
use spam_rs::{logging, Config, SpamService};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(about = "Serve the SMS spam classifier", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML); defaults and SPAM_RS__* variables apply without it
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging
    logging::init(&config.logging)?;

    info!("Starting spam-rs v{}", env!("CARGO_PKG_VERSION"));
    info!("  Listening on: {}", config.server.listen_addr);
    info!("  Vectorizer: {}", config.artifacts.vectorizer_path.display());
    info!("  Model: {}", config.artifacts.model_path.display());

    let service = match SpamService::load(&config.artifacts) {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to load model artifacts: {}", e);
            return Err(e.into());
        }
    };

    let server = ApiServer::new(service, config.server.listen_addr.clone());
    server.run().await?;

    Ok(())
}
