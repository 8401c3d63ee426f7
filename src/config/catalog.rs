//! Environment-derived configuration for the catalog program
//!
//! Every value can be overridden by an environment variable and falls
//! back to a literal default.

use crate::error::{ConfigError, ConfigResult};
use std::fmt::Write as _;
use std::time::Duration;

pub const MONGODB_URI_ENV: &str = "MONGODB_URI";
pub const MONGODB_DATABASE_ENV: &str = "MONGODB_DATABASE";
pub const MONGODB_TIMEOUT_ENV: &str = "MONGODB_TIMEOUT_MS";
pub const APP_ENV_ENV: &str = "APP_ENV";
pub const LOG_LEVEL_ENV: &str = "APP_LOG_LEVEL";

const DEFAULT_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "myapp";
const DEFAULT_TIMEOUT_MS: &str = "5000";
const DEFAULT_APP_ENV: &str = "development";
const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Document store settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub timeout: Duration,
    pub app_env: String,
    pub log_level: String,
}

impl CatalogConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let timeout_raw = get(MONGODB_TIMEOUT_ENV, DEFAULT_TIMEOUT_MS);
        let timeout_ms = timeout_raw.trim().parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "{} must be a whole number of milliseconds, got '{}'",
                MONGODB_TIMEOUT_ENV, timeout_raw
            ))
        })?;

        Ok(Self {
            mongodb_uri: get(MONGODB_URI_ENV, DEFAULT_URI),
            mongodb_database: get(MONGODB_DATABASE_ENV, DEFAULT_DATABASE),
            timeout: Duration::from_millis(timeout_ms),
            app_env: get(APP_ENV_ENV, DEFAULT_APP_ENV),
            log_level: get(LOG_LEVEL_ENV, DEFAULT_LOG_LEVEL),
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// Whether the URI uses DNS seed-list discovery (Atlas style)
    pub fn is_srv(&self) -> bool {
        self.mongodb_uri.starts_with("mongodb+srv://")
    }

    /// Startup banner. Never includes the URI, which may carry credentials.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n===== Application Configuration =====");
        let _ = writeln!(out, "Environment: {}", self.app_env);
        let _ = writeln!(out, "Log Level: {}", self.log_level);
        let _ = writeln!(out, "Database: {}", self.mongodb_database);
        let _ = writeln!(out, "MongoDB Timeout: {}ms", self.timeout.as_millis());
        let _ = writeln!(
            out,
            "Connection: {}",
            if self.is_srv() { "Atlas (SRV)" } else { "Local/Custom" }
        );
        let _ = writeln!(out, "======================================");
        out
    }
}
