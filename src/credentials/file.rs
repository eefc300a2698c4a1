//! Credential store persisted as a JSON file.
//!
//! The file holds a flat JSON object mapping keys to tokens. A missing file
//! reads as an empty store.

use super::CredentialStore;
use crate::error::{Result, TripwiseError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Credential store backed by a JSON file on disk.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Creates a store backed by the file at `path`. The file is not
    /// touched until the first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the default location, `<data_dir>/tripwise/credentials.json`.
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TripwiseError::storage("Cannot determine data directory"))?;
        Ok(data_dir.join("tripwise").join("credentials.json"))
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(TripwiseError::storage_with_source(
                    format!("Failed to read '{}'", self.path.display()),
                    e,
                ))
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            TripwiseError::storage_with_source(
                format!("Failed to parse '{}'", self.path.display()),
                e,
            )
        })
    }

    fn save(&self, tokens: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    TripwiseError::storage_with_source(
                        format!("Failed to create '{}'", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let content = serde_json::to_string_pretty(tokens)?;
        fs::write(&self.path, content).map_err(|e| {
            TripwiseError::storage_with_source(
                format!("Failed to write '{}'", self.path.display()),
                e,
            )
        })?;

        restrict_permissions(&self.path)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| TripwiseError::storage("Credential store lock poisoned"))
    }
}

impl CredentialStore for FileCredentialStore {
    fn name(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, token: &str) -> Result<()> {
        let _guard = self.lock()?;
        let mut tokens = self.load()?;
        tokens.insert(key.to_string(), token.to_string());
        self.save(&tokens)?;

        debug!(path = %self.path.display(), key = %key, "Stored credential");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock()?;
        let mut tokens = self.load()?;
        if tokens.remove(key).is_none() {
            return Ok(());
        }
        self.save(&tokens)?;

        debug!(path = %self.path.display(), key = %key, "Removed credential");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
        TripwiseError::storage_with_source(
            format!("Failed to set permissions on '{}'", path.display()),
            e,
        )
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileCredentialStore {
        FileCredentialStore::new(dir.path().join("nested").join("credentials.json"))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get("token").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_creates_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("token", "secret").unwrap();
        assert!(store.path().exists());
        assert_eq!(store.get("token").unwrap(), Some("secret".to_string()));

        // A second store over the same file sees the token.
        let reopened = FileCredentialStore::new(store.path());
        assert_eq!(reopened.get("token").unwrap(), Some("secret".to_string()));
    }

    #[test]
    fn test_remove_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("token", "secret").unwrap();
        store.set("refresh", "other").unwrap();
        store.remove("token").unwrap();

        assert_eq!(store.get("token").unwrap(), None);
        assert_eq!(store.get("refresh").unwrap(), Some("other".to_string()));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.remove("token").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(&path);
        let err = store.get("token").unwrap_err();
        assert!(matches!(err, TripwiseError::Storage { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("token", "secret").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
