//! zucc - the Zucc It Up! menu and ordering desk
//!
//! Thin entry point; the session logic lives in `orderdesk::session::zucc`.

use anyhow::Result;
use clap::Parser;
use orderdesk::OrderdeskError;
use orderdesk::config::load_settings;
use orderdesk::prompt::Prompter;
use orderdesk::{logging, session};

/// Interactive menu and ordering desk backed by PostgreSQL.
///
/// The server address comes from ~/.orderdesk/config.toml or
/// ORDERDESK_SERVER_URL; credentials are asked for at startup.
#[derive(Parser)]
#[command(name = "zucc", version, about)]
struct Args {}

#[tokio::main]
async fn main() -> Result<()> {
    Args::parse();

    let settings = load_settings()?;
    logging::init(&settings.log_level, true);

    let mut prompter = Prompter::stdio();
    match session::zucc::start(&settings, &mut prompter).await {
        Ok(()) => Ok(()),
        Err(OrderdeskError::Quit) => {
            println!("Goodbye!");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
