//! TOML-based configuration.
//!
//! Holds the three user settings under the `[standup-extension]` group:
//!
//! ```toml
//! [standup-extension]
//! enableHourlyNotification = true
//! enableElapsedTime = true
//! refreshTime = 60000
//! ```
//!
//! Configuration is stored at `~/.config/standup/config.toml`. A key that is
//! absent falls back to its default; an explicit `false` is kept as is.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::host::SettingsSource;

pub const CONFIG_SECTION: &str = "standup-extension";
pub const DEFAULT_REFRESH_TIME_MS: u64 = 60_000;

const MS_PER_HOUR: u64 = 3_600_000;

/// Snapshot of the user settings, re-read on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_true")]
    pub enable_hourly_notification: bool,
    #[serde(default = "default_true")]
    pub enable_elapsed_time: bool,
    /// Tick period in milliseconds.
    #[serde(default = "default_refresh_time")]
    pub refresh_time: u64,
}

fn default_true() -> bool {
    true
}
fn default_refresh_time() -> u64 {
    DEFAULT_REFRESH_TIME_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_hourly_notification: true,
            enable_elapsed_time: true,
            refresh_time: DEFAULT_REFRESH_TIME_MS,
        }
    }
}

impl Settings {
    pub fn any_enabled(&self) -> bool {
        self.enable_hourly_notification || self.enable_elapsed_time
    }

    /// Number of ticks between break reminders. At least 1, so periods of
    /// an hour or more remind on every tick.
    pub fn ticks_per_hour(&self) -> u64 {
        (MS_PER_HOUR / self.refresh_time.max(1)).max(1)
    }

    /// Replaces a zero refresh time with the default.
    pub fn validated(mut self) -> Self {
        if self.refresh_time == 0 {
            warn!(
                default = DEFAULT_REFRESH_TIME_MS,
                "refreshTime must be greater than 0; using default"
            );
            self.refresh_time = DEFAULT_REFRESH_TIME_MS;
        }
        self
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/standup/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "standup-extension", default)]
    pub standup: Settings,
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    _ => return Err(unknown()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// `<data_dir>/config.toml`.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Reads the file at `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        toml::from_str(&content).map_err(|e| {
            ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// for that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        if updated.standup.refresh_time == 0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "refreshTime must be greater than 0".into(),
            }
            .into());
        }
        *self = updated;
        Ok(())
    }
}

/// Settings source that re-reads the config file on every call, so edits
/// take effect on the next tick.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file at [`Config::path`].
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Config::path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        Config::load_from(&self.path)
    }
}

impl SettingsSource for ConfigFile {
    fn read_settings(&mut self) -> Result<Settings> {
        Ok(self.load()?.standup.validated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        assert!(toml_str.contains("[standup-extension]"));
        assert!(toml_str.contains("refreshTime = 60000"));
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn absent_keys_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[standup-extension]\n").unwrap();
        assert_eq!(parsed.standup, Settings::default());
        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty.standup, Settings::default());
    }

    #[test]
    fn explicit_false_is_honoured() {
        let parsed: Config =
            toml::from_str("[standup-extension]\nenableHourlyNotification = false\n").unwrap();
        assert!(!parsed.standup.enable_hourly_notification);
        assert!(parsed.standup.enable_elapsed_time);
    }

    #[test]
    fn zero_refresh_time_is_replaced_on_read() {
        let settings = Settings {
            refresh_time: 0,
            ..Settings::default()
        }
        .validated();
        assert_eq!(settings.refresh_time, DEFAULT_REFRESH_TIME_MS);
    }

    #[test]
    fn ticks_per_hour_uses_integer_division() {
        let mut settings = Settings::default();
        assert_eq!(settings.ticks_per_hour(), 60);
        settings.refresh_time = 7_000;
        assert_eq!(settings.ticks_per_hour(), 514);
        settings.refresh_time = 2 * MS_PER_HOUR;
        assert_eq!(settings.ticks_per_hour(), 1);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get("standup-extension.enableElapsedTime").as_deref(),
            Some("true")
        );
        assert_eq!(
            cfg.get("standup-extension.refreshTime").as_deref(),
            Some("60000")
        );
        assert!(cfg.get("standup-extension.missing").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_bool_and_number() {
        let mut cfg = Config::default();
        cfg.set("standup-extension.enableHourlyNotification", "false")
            .unwrap();
        cfg.set("standup-extension.refreshTime", "30000").unwrap();
        assert!(!cfg.standup.enable_hourly_notification);
        assert_eq!(cfg.standup.refresh_time, 30_000);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("standup-extension.nonexistent", "1").is_err());
        assert!(cfg.set("standup-extension", "1").is_err());
        assert!(cfg
            .set("standup-extension.enableElapsedTime", "not_a_bool")
            .is_err());
        assert!(cfg.set("standup-extension.refreshTime", "-5").is_err());
        assert!(cfg.set("standup-extension.refreshTime", "0").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn missing_file_reads_defaults() {
        let dir = TempDir::new().unwrap();
        let mut source = ConfigFile::new(dir.path().join("config.toml"));
        assert_eq!(source.read_settings().unwrap(), Settings::default());
    }

    #[test]
    fn config_file_is_reread_on_every_call() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut source = ConfigFile::new(&path);

        let mut cfg = Config::default();
        cfg.set("standup-extension.enableElapsedTime", "false").unwrap();
        cfg.save_to(&path).unwrap();
        assert!(!source.read_settings().unwrap().enable_elapsed_time);

        Config::default().save_to(&path).unwrap();
        assert!(source.read_settings().unwrap().enable_elapsed_time);
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[standup-extension\nrefreshTime = ").unwrap();
        assert!(ConfigFile::new(&path).read_settings().is_err());
    }
}
