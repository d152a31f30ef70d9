//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::HttpApiConfig;
use crate::location::Coordinate;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn http(&self) -> HttpApiConfig {
        HttpApiConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Device position configuration.
///
/// A terminal has no position sensor; a configured coordinate stands in for
/// one. Without it the dashboard starts in search mode.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    #[serde(default = "default_locate_timeout")]
    pub timeout_ms: u64,
}

fn default_locate_timeout() -> u64 {
    8000
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            timeout_ms: default_locate_timeout(),
        }
    }
}

impl LocationConfig {
    /// The configured position, if both halves are present
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude?, self.longitude?))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("airwatch").join("config.toml")),
            Some(PathBuf::from("/etc/airwatch/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `AIRWATCH_*` overrides read through `var`
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("AIRWATCH_API_URL") {
            self.api.base_url = url;
        }

        // Location overrides
        if let Some(lat) = var("AIRWATCH_LATITUDE") {
            if let Ok(v) = lat.parse() {
                self.location.latitude = Some(v);
            }
        }
        if let Some(lng) = var("AIRWATCH_LONGITUDE") {
            if let Ok(v) = lng.parse() {
                self.location.longitude = Some(v);
            }
        }

        // Logging overrides
        if let Some(level) = var("AIRWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("AIRWATCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Airwatch Configuration
#
# Environment variables override these settings:
# - AIRWATCH_API_URL
# - AIRWATCH_LATITUDE
# - AIRWATCH_LONGITUDE
# - AIRWATCH_LOG_LEVEL
# - AIRWATCH_LOG_FORMAT

[api]
# Base URL of the air-quality backend
base_url = "http://localhost:5000/api"

# Request timeout in seconds
request_timeout_secs = 10

[location]
# Fixed device position; leave unset to start in search mode
# latitude = 12.9716
# longitude = 77.5946

# How long to wait for a position (ms)
timeout_ms = 8000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.request_timeout_secs, 10);
        assert_eq!(config.location.coordinate(), None);
        assert_eq!(config.location.timeout(), Duration::from_millis(8000));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[location]\nlatitude = 13.93\nlongitude = 75.57\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.location.coordinate(), Some(Coordinate::new(13.93, 75.57)));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/nonexistent/airwatch.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = 3").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("AIRWATCH_API_URL", "http://aq.example:8000/api"),
            ("AIRWATCH_LATITUDE", "28.61"),
            ("AIRWATCH_LONGITUDE", "not-a-number"),
            ("AIRWATCH_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://aq.example:8000/api");
        assert_eq!(config.location.latitude, Some(28.61));
        assert_eq!(config.location.longitude, None);
        assert_eq!(config.location.coordinate(), None);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_http_config() {
        let http = ApiConfig::default().http();
        assert_eq!(http.request_timeout_ms, 10_000);
        assert_eq!(http.base_url, "http://localhost:5000/api");
    }
}
