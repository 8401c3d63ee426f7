//! Configuration management
//!
//! Server address and settings for `zucc`, environment configuration for
//! `catalog`.

pub mod catalog;
pub mod server;
pub mod settings;

pub use catalog::CatalogConfig;
pub use server::{ServerConfig, SslMode};
pub use settings::{Settings, load_settings};
