//! Configuration module for rostr
//!
//! Manages application configuration: server endpoints, paging defaults
//! and the download location. Configuration is stored in the user's
//! config directory.

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

const fn default_page_size() -> u32 {
    5
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RostrConfig {
    /// Base URL of the record API server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL of the web UI for edit/create navigation (defaults to `base_url`)
    #[serde(default)]
    pub web_url: Option<String>,

    /// Records per page when the CLI does not say otherwise
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Where exported files are saved (defaults to the current directory)
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for RostrConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            web_url: None,
            page_size: default_page_size(),
            download_dir: None,
            quiet: false,
        }
    }
}

impl RostrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("rostr").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Web UI base URL, falling back to the API base
    #[must_use]
    pub fn web_url(&self) -> &str {
        self.web_url.as_deref().unwrap_or(&self.base_url)
    }

    /// Download directory, falling back to the current directory
    #[must_use]
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Apply a `key=value` setting from the `config set` command
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or unparseable values.
    pub fn apply_setting(&mut self, setting: &str) -> Result<(), ConfigError> {
        let Some((key, value)) = setting.split_once('=') else {
            return Err(ConfigError::Message(
                "Invalid format. Use: rostr config set key=value".to_string(),
            ));
        };

        let key = key.trim();
        let value = value.trim();

        match key {
            "base_url" => self.base_url = value.to_string(),
            "web_url" => {
                self.web_url = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "page_size" => {
                let parsed = value.parse::<u32>().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for page_size: '{value}'. Use a positive integer"
                    ))
                })?;
                if parsed == 0 {
                    return Err(ConfigError::Message(
                        "page_size must be greater than zero".to_string(),
                    ));
                }
                self.page_size = parsed;
            }
            "download_dir" => {
                self.download_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "quiet" => {
                self.quiet = value.parse::<bool>().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for quiet: '{value}'. Use 'true' or 'false'"
                    ))
                })?;
            }
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown configuration key: '{key}'. Available keys: base_url, web_url, page_size, download_dir, quiet"
                )));
            }
        }
        Ok(())
    }

    /// Read a value for the `config get` command
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "base_url" => Ok(self.base_url.clone()),
            "web_url" => Ok(self.web_url().to_string()),
            "page_size" => Ok(self.page_size.to_string()),
            "download_dir" => Ok(self.download_dir().display().to_string()),
            "quiet" => Ok(self.quiet.to_string()),
            _ => Err(ConfigError::Message(format!(
                "Unknown configuration key: '{key}'. Available keys: base_url, web_url, page_size, download_dir, quiet"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RostrConfig::default();

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.web_url(), "http://localhost:3000");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.download_dir(), PathBuf::from("."));
        assert!(!config.quiet);
    }

    #[test]
    fn test_apply_setting_round_trip() {
        let mut config = RostrConfig::default();

        config.apply_setting("page_size=25").unwrap();
        config
            .apply_setting("base_url=http://api.internal:8080")
            .unwrap();
        config.apply_setting("quiet=true").unwrap();

        assert_eq!(config.get_value("page_size").unwrap(), "25");
        assert_eq!(
            config.get_value("base_url").unwrap(),
            "http://api.internal:8080"
        );
        assert_eq!(config.get_value("quiet").unwrap(), "true");
    }

    #[test]
    fn test_apply_setting_rejects_bad_input() {
        let mut config = RostrConfig::default();

        assert!(config.apply_setting("page_size=zero").is_err());
        assert!(config.apply_setting("page_size=0").is_err());
        assert!(config.apply_setting("no-equals-sign").is_err());
        assert!(config.apply_setting("unknown=1").is_err());
    }

    #[test]
    fn test_web_url_falls_back_to_base() {
        let mut config = RostrConfig::default();
        assert_eq!(config.web_url(), config.base_url);

        config.apply_setting("web_url=http://admin.local").unwrap();
        assert_eq!(config.web_url(), "http://admin.local");
    }

    #[test]
    fn test_clearing_optional_keys() {
        let mut config = RostrConfig::default();
        config.apply_setting("download_dir=/tmp/exports").unwrap();
        assert_eq!(config.download_dir(), PathBuf::from("/tmp/exports"));

        config.apply_setting("download_dir=").unwrap();
        assert_eq!(config.download_dir(), PathBuf::from("."));
    }
}
