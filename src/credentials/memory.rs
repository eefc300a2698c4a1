//! In-process credential store.

use super::CredentialStore;
use crate::error::{Result, TripwiseError};
use std::collections::HashMap;
use std::sync::RwLock;

/// Credential store that keeps tokens in memory for the lifetime of the
/// process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    tokens: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a single token.
    pub fn with_token(key: impl Into<String>, token: impl Into<String>) -> Self {
        let mut tokens = HashMap::new();
        tokens.insert(key.into(), token.into());
        Self {
            tokens: RwLock::new(tokens),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let tokens = self
            .tokens
            .read()
            .map_err(|_| TripwiseError::storage("Credential store lock poisoned"))?;
        Ok(tokens.get(key).cloned())
    }

    fn set(&self, key: &str, token: &str) -> Result<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| TripwiseError::storage("Credential store lock poisoned"))?;
        tokens.insert(key.to_string(), token.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| TripwiseError::storage("Credential store lock poisoned"))?;
        tokens.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_store() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let store = MemoryCredentialStore::new();
        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").unwrap(), Some("abc".to_string()));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = MemoryCredentialStore::with_token("token", "abc");
        store.remove("token").unwrap();
        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_concurrent_remove() {
        let store = Arc::new(MemoryCredentialStore::with_token("token", "abc"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.remove("token"))
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert_eq!(store.get("token").unwrap(), None);
    }
}
