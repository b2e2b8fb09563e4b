use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::errors::{DeskchatError, DeskchatResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: "info".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads the config file, creating it with defaults on first run.
/// `DESKCHAT_ENDPOINT` overrides the endpoint for this process only.
pub fn initialize_config() -> DeskchatResult<()> {
    let config_path = get_config_path()?;

    let mut config = if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| DeskchatError::config_error(format!("failed to read config file: {}", e)))?;

        serde_json::from_str(&config_str)
            .map_err(|e| DeskchatError::config_error(format!("failed to parse config: {}", e)))?
    } else {
        let config = Config::default();

        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            DeskchatError::config_error(format!("failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| DeskchatError::config_error(format!("failed to serialize config: {}", e)))?;

        fs::write(&config_path, config_str)
            .map_err(|e| DeskchatError::config_error(format!("failed to write config file: {}", e)))?;

        config
    };

    if let Ok(endpoint) = env::var("DESKCHAT_ENDPOINT") {
        config.endpoint = endpoint;
    }

    validate_config(&config)?;

    *CONFIG.write().unwrap() = config;

    Ok(())
}

fn get_config_path() -> DeskchatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| DeskchatError::config_error("could not determine home directory"))?;

    Ok(home_dir.join(".config").join("deskchat").join("config.json"))
}

fn validate_config(config: &Config) -> DeskchatResult<()> {
    if config.endpoint.is_empty() {
        return Err(DeskchatError::config_error("endpoint is required"));
    }

    if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
        return Err(DeskchatError::config_error(
            "endpoint must be an http(s) URL",
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(DeskchatError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    if config.log_level.is_empty() {
        return Err(DeskchatError::config_error("log_level is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_empty_endpoint() {
        let mut config = Config::default();
        config.endpoint = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_non_http_endpoint() {
        let mut config = Config::default();
        config.endpoint = "ftp://127.0.0.1/api/chat".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_zero_timeout() {
        let mut config = Config::default();
        config.request_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.endpoint = "http://localhost:9999/api/chat".to_string();

        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded: Config = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(loaded.endpoint, config.endpoint);
        assert_eq!(loaded.request_timeout_secs, config.request_timeout_secs);
        assert_eq!(loaded.log_level, config.log_level);
    }
}
