//! catalog - product and order management over MongoDB
//!
//! Thin entry point; the session logic lives in `orderdesk::session::catalog`.

use anyhow::Result;
use clap::Parser;
use orderdesk::OrderdeskError;
use orderdesk::config::CatalogConfig;
use orderdesk::prompt::Prompter;
use orderdesk::{logging, session};

/// Interactive product catalog backed by MongoDB.
///
/// Configured through MONGODB_URI, MONGODB_DATABASE, MONGODB_TIMEOUT_MS,
/// APP_ENV and APP_LOG_LEVEL.
#[derive(Parser)]
#[command(name = "catalog", version, about)]
struct Args {}

#[tokio::main]
async fn main() -> Result<()> {
    Args::parse();

    let config = CatalogConfig::from_env()?;
    logging::init(&config.log_level, !config.is_production());

    let mut prompter = Prompter::stdio();
    match session::catalog::start(&config, &mut prompter).await {
        Ok(()) => Ok(()),
        Err(OrderdeskError::Quit) => {
            println!("\n===== Goodbye! =====");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
