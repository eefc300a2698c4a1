//! Credential storage.
//!
//! The client never reaches for ambient global state to find its bearer
//! token. Instead a [`CredentialStore`] is injected at construction time,
//! which lets the CLI persist tokens on disk and tests swap in an
//! in-memory store.

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

use crate::error::Result;

/// Default key the bearer token is stored under.
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Key/value storage for bearer tokens.
///
/// Implementations must tolerate concurrent readers and concurrent
/// removals of the same key. Removing an absent key is not an error.
pub trait CredentialStore: Send + Sync {
    /// Returns the short name of the store (for logging).
    fn name(&self) -> &'static str;

    /// Reads the token stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `token` under `key`, replacing any previous value.
    fn set(&self, key: &str, token: &str) -> Result<()>;

    /// Erases the token stored under `key`.
    fn remove(&self, key: &str) -> Result<()>;
}
