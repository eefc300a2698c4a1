//! tripwise - client bindings for the tripwise travel API
//!
//! This crate wraps the travel backend's HTTP endpoints (assistant queries,
//! current user, personalized recommendations, search history) behind an
//! authenticated client.
//!
//! # Overview
//!
//! Every request reads a bearer token from an injected
//! [`CredentialStore`], sends one GET through a [`Transport`], and turns
//! the outcome into either a decoded response or a [`TripwiseError`]. A
//! 401 from the backend erases the stored token.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`client`] - API client and HTTP transport
//! - [`config`] - Configuration file parsing and validation
//! - [`credentials`] - Bearer token storage
//! - [`error`] - Error types and error handling
//! - [`models`] - Response types

pub mod cli;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;

// Re-exports for convenience
pub use cli::Cli;
pub use client::{ReqwestTransport, Transport, TravelClient};
pub use config::Config;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{ErrorCode, Result, TripwiseError};
