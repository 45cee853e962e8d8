use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Which backend answers the user's messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Ask the INGRES backend over HTTP.
    #[default]
    Network,
    /// Canned keyword replies, no network.
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min: u64,
    pub max: u64,
}

impl Default for DelayRange {
    fn default() -> Self {
        Self { min: 1500, max: 2500 }
    }
}

/// Application configuration, read from `config.yml`.
///
/// Every field has a default so a partial (or missing) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub mode: BackendMode,
    pub status_poll_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub local_delay_ms: DelayRange,
    pub max_input_chars: usize,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            mode: BackendMode::Network,
            status_poll_secs: 30,
            request_timeout_secs: None,
            local_delay_ms: DelayRange::default(),
            max_input_chars: 500,
            log_dir: PathBuf::from("./logs"),
            log_level: "info".to_string(),
            export_dir: PathBuf::from("./transcripts"),
        }
    }
}

impl AppConfig {
    /// Loads the config file at `path`, falling back to defaults when it doesn't exist.
    /// Not validated: env and CLI overrides still apply, then call [`AppConfig::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Applies `INGRES_API_URL` and `INGRES_OFFLINE` on top of the file values.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("INGRES_API_URL") {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }

        if let Ok(offline) = std::env::var("INGRES_OFFLINE") {
            if matches!(offline.trim(), "1" | "true" | "yes") {
                self.mode = BackendMode::Local;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err("api_base_url must not be empty".into());
        }
        if self.status_poll_secs == 0 {
            return Err("status_poll_secs must be greater than zero".into());
        }
        if self.local_delay_ms.min > self.local_delay_ms.max {
            return Err(ChatError::ConfigError(format!(
                "local_delay_ms.min ({}) exceeds local_delay_ms.max ({})",
                self.local_delay_ms.min, self.local_delay_ms.max
            )));
        }
        if self.max_input_chars == 0 {
            return Err("max_input_chars must be greater than zero".into());
        }
        Ok(())
    }

    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_secs(self.status_poll_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
api_base_url: "http://ingres.local:9000"
"#;

        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.api_base_url, "http://ingres.local:9000");
        assert_eq!(config.mode, BackendMode::Network);
        assert_eq!(config.status_poll_secs, 30);
        assert_eq!(config.max_input_chars, 500);
        assert_eq!(config.local_delay_ms, DelayRange { min: 1500, max: 2500 });
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_local_mode_config() {
        let yaml = r#"
mode: local
local_delay_ms:
  min: 10
  max: 20
request_timeout_secs: 5
"#;

        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.mode, BackendMode::Local);
        assert_eq!(config.local_delay_ms.min, 10);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_inverted_delay_range() {
        let yaml = r#"
local_delay_ms:
  min: 3000
  max: 1000
"#;

        let config = AppConfig::from_yaml(yaml).unwrap();
        assert!(matches!(config.validate(), Err(ChatError::ConfigError(_))));
    }

    #[test]
    fn test_zero_poll_interval() {
        let config = AppConfig::from_yaml("status_poll_secs: 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_url_can_be_overridden() {
        let mut config = AppConfig::from_yaml("api_base_url: \"\"\n").unwrap();
        assert!(config.validate().is_err());

        config.api_base_url = "http://localhost:5000".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_leaves_validation_to_caller() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "api_base_url: \"\"\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert!(config.api_base_url.is_empty());
    }

    #[test]
    fn test_unknown_mode() {
        let result = AppConfig::from_yaml("mode: carrier_pigeon\n");
        assert!(matches!(result, Err(ChatError::YamlError(_))));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.yml")).unwrap();
        assert_eq!(config.api_base_url, AppConfig::default().api_base_url);
    }
}
