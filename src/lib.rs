//! orderdesk - terminal ordering desks over PostgreSQL and MongoDB
//!
//! Two interactive programs share this library:
//!
//! - `zucc` manages a food menu and orders in two PostgreSQL tables
//! - `catalog` manages products and orders in a MongoDB database
//!
//! # Architecture
//!
//! - [`config`]: server address, settings file, environment configuration
//! - [`db`]: access-layer traits and their PostgreSQL/MongoDB implementations
//! - [`session`]: the interactive menu loops
//! - [`prompt`]: line prompts with the `q` quit keystroke
//! - [`display`]: fixed-width tables and document listings
//! - [`error`]: error types and result aliases
//!
//! # Example
//!
//! ```no_run
//! use orderdesk::config::ServerConfig;
//! use orderdesk::db::{OrderStore, Table};
//! use orderdesk::db::postgres::PostgresServer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_url("postgres://localhost:5432/orderdesk")?;
//! let server = PostgresServer::connect(&config, "zucc_user", "secret").await?;
//!
//! server.reset_tables().await?;
//! server.populate_menu().await?;
//! println!("{}", server.display_table(Table::Menu).await?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod session;
pub mod validate;

pub use error::{ConfigError, DbError, OrderdeskError, Result};
