mod config;
pub mod database;

pub use config::{Config, ConfigFile, Settings, CONFIG_SECTION, DEFAULT_REFRESH_TIME_MS};
pub use database::{Database, PREV_SESSION_KEY};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/standup[-dev]/` based on STANDUP_ENV.
///
/// Set STANDUP_ENV=dev to use development data directory. STANDUP_HOME
/// replaces the whole path.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("STANDUP_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .ok_or_else(|| ConfigError::DataDir("home directory not found".into()))?
                .join(".config");
            let env = std::env::var("STANDUP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("standup-dev")
            } else {
                base_dir.join("standup")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
