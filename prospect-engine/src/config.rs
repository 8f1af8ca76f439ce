//! Configuration loading for the lead engine.
//!
//! All fields are required unless explicitly marked optional. No defaults.

use prospect_remote::CrmCredentials;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    pub api_base_url: String,
    pub auth: AuthConfig,
    pub request_timeout_ms: u64,
    pub page_size: usize,
    pub settings_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or PROSPECT_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl EngineConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.auth.api_key.is_none() && self.auth.bearer_token.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "auth",
                reason: "api_key or bearer_token must be provided".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: "must be > 0".to_string(),
            });
        }
        if self.settings_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "settings_path",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The credential pair the HTTP client sends with every request.
    pub fn credentials(&self) -> CrmCredentials {
        CrmCredentials {
            api_key: self.auth.api_key.clone(),
            bearer_token: self.auth.bearer_token.clone(),
        }
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("PROSPECT_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_toml() -> &'static str {
        r#"
            api_base_url = "http://localhost:4000"
            request_timeout_ms = 5000
            page_size = 10
            settings_path = "/tmp/prospect-settings.json"

            [auth]
            api_key = "k-123"
        "#
    }

    #[test]
    fn test_valid_config_parses_and_validates() {
        let config: EngineConfig = toml::from_str(valid_toml()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.credentials().api_key.as_deref(), Some("k-123"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config: EngineConfig = toml::from_str(valid_toml()).unwrap();
        config.request_timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "request_timeout_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config: EngineConfig = toml::from_str(valid_toml()).unwrap();
        config.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let mut config: EngineConfig = toml::from_str(valid_toml()).unwrap();
        config.auth.api_key = None;
        config.auth.bearer_token = None;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "auth", .. }
        ));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let toml_with_extra = format!("{}\nsurprise = true\n", valid_toml());
        assert!(toml::from_str::<EngineConfig>(&toml_with_extra).is_err());
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, valid_toml()).unwrap();

        let config = EngineConfig::from_path(&path).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:4000");
    }
}
