//! Credential storage configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::credentials::{FileCredentialStore, DEFAULT_TOKEN_KEY};
use crate::error::Result;

/// Where the bearer token lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Credentials file. Defaults to the platform data directory.
    pub path: Option<PathBuf>,

    /// Key the token is stored under.
    pub key: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            path: None,
            key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

impl CredentialsConfig {
    /// Returns the configured path, or the default location.
    pub fn resolved_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => FileCredentialStore::default_path(),
        }
    }

    /// Opens the file store at the resolved path. Needs no API settings, so
    /// `login` and `logout` work without a reachable backend.
    pub fn store(&self) -> Result<FileCredentialStore> {
        Ok(FileCredentialStore::new(self.resolved_path()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialStore;
    use tempfile::TempDir;

    #[test]
    fn test_credentials_config_default() {
        let config = CredentialsConfig::default();
        assert_eq!(config.key, "token");
        assert!(config.path.is_none());
    }

    #[test]
    fn test_resolved_path_configured() {
        let config = CredentialsConfig {
            path: Some(PathBuf::from("/tmp/creds.json")),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_path().unwrap(),
            PathBuf::from("/tmp/creds.json")
        );
    }

    #[test]
    fn test_store_saves_under_configured_key() {
        let dir = TempDir::new().unwrap();
        let config = CredentialsConfig {
            path: Some(dir.path().join("nested").join("credentials.json")),
            key: "session".to_string(),
        };

        let store = config.store().unwrap();
        store.set(&config.key, "tok-1").unwrap();

        let reopened = config.store().unwrap();
        assert_eq!(reopened.get("session").unwrap().as_deref(), Some("tok-1"));
        assert!(reopened.get("token").unwrap().is_none());

        reopened.remove(&config.key).unwrap();
        assert!(config.store().unwrap().get("session").unwrap().is_none());
    }
}
