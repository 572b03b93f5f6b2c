//! Application Configuration
//!
//! This module provides configuration management for the application,
//! supporting a YAML configuration file with sensible defaults and a few
//! environment overrides (`DATABASE_URL`, `STORE_BACKEND`, `PORT`).

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file, overridable with `FILEDESK_CONFIG`
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Storage backend types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    SQLite,
    Mock,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "database" | "db" => Ok(StoreBackend::SQLite),
            "mock" | "memory" => Ok(StoreBackend::Mock),
            _ => Err(format!("Unknown store backend: {}", s)),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of worker threads
    pub workers: usize,
    /// Maximum JSON body size in bytes
    pub max_json_payload: usize,
    /// Echo persistence error details back to clients (development only)
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: 4,
            max_json_payload: 10 * 1024 * 1024,
            expose_error_details: false,
        }
    }
}

/// Persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    /// Connection string; required by the SQLite backend
    pub url: Option<String>,
    /// Upper bound on a single store call
    pub timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::SQLite,
            url: None,
            timeout_ms: 5000,
        }
    }
}

impl DatabaseConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Path to the log4rs configuration file
    pub config_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            config_file: "server_log.yaml".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file (defaults if absent), then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_file(&config_path)?;
        Self::log_source(&config_path);
        config.apply_env_overrides();
        Ok(config)
    }

    /// `FILEDESK_CONFIG`, or `config.yaml`
    pub fn config_path() -> String {
        env::var("FILEDESK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Load configuration from a YAML file, use defaults if not found. Logs
    /// nothing, so it can run before the logger exists.
    pub fn load_file(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Report where the configuration came from
    pub fn log_source(path: &str) {
        if Path::new(path).exists() {
            info!("Loaded configuration from {}", path);
        } else {
            warn!("Config file {} not found, using defaults", path);
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            info!("Using database URL from environment");
            self.database.url = Some(url);
        }

        if let Some(backend) = lookup("STORE_BACKEND") {
            match backend.parse::<StoreBackend>() {
                Ok(backend) => {
                    info!("Using store backend from environment: {:?}", backend);
                    self.database.backend = backend;
                }
                Err(e) => warn!("Invalid store backend in environment: {}. Keeping {:?}.", e, self.database.backend),
            }
        }

        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Invalid PORT in environment: {}. Keeping {}.", port, self.server.port),
            }
        }
    }

    /// Configuration for tests: mock stores, everything else default
    pub fn for_mock() -> Self {
        let mut config = Self::default();
        config.database.backend = StoreBackend::Mock;
        config
    }
}
