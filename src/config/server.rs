//! Relational server address
//!
//! Where the `zucc` program connects. Credentials are never stored here:
//! they are collected at the login prompt for every session.

use crate::error::{ConfigError, ConfigResult};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the configured server address
pub const SERVER_URL_ENV: &str = "ORDERDESK_SERVER_URL";

/// Database server address (everything but the credentials)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Database host
    #[serde(default = "default_host")]
    pub host: String,

    /// Database port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name
    #[serde(default = "default_database")]
    pub database: String,

    /// SSL mode
    #[serde(default)]
    pub ssl_mode: SslMode,
}

/// SSL connection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SslMode {
    Disable,
    #[default]
    Prefer,
    Require,
}

impl SslMode {
    fn as_str(self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_database() -> String {
    "orderdesk".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            ssl_mode: SslMode::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a `postgres://host[:port]/dbname[?sslmode=..]` URL.
    ///
    /// URLs carrying `user:pass@` are refused; the login prompt is the
    /// only source of credentials.
    pub fn from_url(url: &str) -> ConfigResult<Self> {
        let url = url.trim();
        let rest = url
            .strip_prefix("postgres://")
            .or_else(|| url.strip_prefix("postgresql://"))
            .ok_or_else(|| ConfigError::Invalid("URL must start with postgres://".into()))?;

        if rest.contains('@') {
            return Err(ConfigError::Invalid(
                "server URL must not contain credentials".into(),
            ));
        }

        let (host_port, database) = rest
            .split_once('/')
            .ok_or_else(|| ConfigError::Invalid("URL must contain /dbname".into()))?;

        let (database, ssl_mode) = if let Some((db, query)) = database.split_once('?') {
            (db, parse_sslmode_param(query))
        } else {
            (database, SslMode::Prefer)
        };
        let database = percent_decode_str(database)
            .decode_utf8()
            .map_err(|e| ConfigError::Invalid(format!("Invalid database name: {}", e)))?
            .into_owned();
        if database.is_empty() {
            return Err(ConfigError::Invalid("URL must contain /dbname".into()));
        }

        let (host, port) = if let Some((h, p)) = host_port.split_once(':') {
            let port = p
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid(format!("Invalid port: {}", p)))?;
            (h.to_string(), port)
        } else {
            (host_port.to_string(), default_port())
        };

        Ok(Self {
            host,
            port,
            database,
            ssl_mode,
        })
    }

    /// Human-readable address, safe to print
    pub fn address(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }

    /// Build a full connection string for the given credentials
    pub fn connection_string(&self, username: &str, password: &str) -> String {
        format!(
            "host={} port={} dbname={} user={} password={} sslmode={}",
            quote_param(&self.host),
            self.port,
            quote_param(&self.database),
            quote_param(username),
            quote_param(password),
            self.ssl_mode.as_str()
        )
    }

    /// Get the config directory path (~/.orderdesk/)
    pub fn config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".orderdesk"))
    }

    /// Apply the `ORDERDESK_SERVER_URL` override, if set
    pub fn with_env_override(self) -> ConfigResult<Self> {
        match std::env::var(SERVER_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::from_url(&url),
            _ => Ok(self),
        }
    }
}

/// Parse the `sslmode` value from a URL query string
fn parse_sslmode_param(query: &str) -> SslMode {
    for param in query.split('&') {
        if let Some(value) = param.strip_prefix("sslmode=") {
            return match value {
                "disable" => SslMode::Disable,
                "require" => SslMode::Require,
                _ => SslMode::Prefer,
            };
        }
    }
    SslMode::Prefer
}

/// Quote a key/value connection parameter (libpq rules: wrap in single
/// quotes, backslash-escape `'` and `\`)
fn quote_param(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
