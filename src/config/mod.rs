//! Configuration module for tripwise.
//!
//! This module provides all configuration types and loading functionality.
//! Configuration is read from a YAML file; every section is optional.

mod api;
mod credentials;
mod logging;

pub use api::{ApiConfig, DEFAULT_BASE_URL};
pub use credentials::CredentialsConfig;
pub use logging::{LogFormat, LogLevel, LogOutput, LoggingConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::TripwiseError;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API configuration.
    pub api: ApiConfig,

    /// Credential storage configuration.
    pub credentials: CredentialsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration from an optional path.
    /// If path is None, uses default search paths.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, TripwiseError> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => {
                for path in Self::default_paths() {
                    if path.exists() {
                        return Self::load_from_path(path);
                    }
                }

                // No config file found, use defaults
                Ok(Self::default())
            }
        }
    }

    /// Candidate config files, in lookup order.
    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("tripwise.yaml"), PathBuf::from("tripwise.yml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("tripwise").join("config.yaml"));
        }
        paths
    }

    /// Loads configuration from a YAML file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TripwiseError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TripwiseError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::load_from_str(&content)
    }

    /// Loads configuration from a YAML string.
    pub fn load_from_str(content: &str) -> Result<Self, TripwiseError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| TripwiseError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validates configuration.
    pub fn validate(&self) -> Result<(), TripwiseError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(TripwiseError::config("api.base_url must not be empty"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(TripwiseError::config(format!(
                "api.base_url must start with http:// or https:// (got '{}')",
                base_url
            )));
        }

        if self.api.timeout_seconds == Some(0) {
            return Err(TripwiseError::config("api.timeout_seconds must be > 0"));
        }

        if self.credentials.key.trim().is_empty() {
            return Err(TripwiseError::config("credentials.key must not be empty"));
        }

        if self.logging.output == LogOutput::File && self.logging.file_path.is_none() {
            return Err(TripwiseError::config(
                "logging.file_path is required when output is file",
            ));
        }

        Ok(())
    }
}
