//! User settings for the relational program
//!
//! Read from ~/.orderdesk/config.toml:
//!
//! ```toml
//! log_level = "warn"
//! reset_on_start = true
//!
//! [server]
//! host = "localhost"
//! port = 5432
//! database = "orderdesk"
//! ssl_mode = "prefer"
//! ```

use crate::config::ServerConfig;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Drop and recreate both tables, then seed the menu, at session start
    #[serde(default = "default_true")]
    pub reset_on_start: bool,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            reset_on_start: default_true(),
            server: ServerConfig::default(),
        }
    }
}

/// Load settings from config file, then apply environment overrides
pub fn load_settings() -> ConfigResult<Settings> {
    let path = ServerConfig::config_dir()?.join("config.toml");
    let mut settings = load_settings_from(&path)?;
    settings.server = settings.server.with_env_override()?;
    Ok(settings)
}

/// Load settings from an explicit path; a missing file means defaults
pub fn load_settings_from(path: &Path) -> ConfigResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::NotFound(format!("{}: {}", path.display(), e)))?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}
