//! Error types and error handling for tripwise.
//!
//! Every fault raised while talking to the travel backend ends up in
//! [`TripwiseError`]. The request-level variants mirror what the backend
//! can tell us (missing credential, expired session, rejected request,
//! other HTTP failures); anything else is wrapped as
//! [`TripwiseError::Unexpected`] together with the operation that failed.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::client::Operation;

/// Boxed error used as the source of wrapped faults.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Stable identifiers for each error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// T001: No credential is stored
    #[serde(rename = "T001")]
    NoCredential,

    /// T002: The backend rejected the credential
    #[serde(rename = "T002")]
    SessionExpired,

    /// T003: The backend rejected the request parameters
    #[serde(rename = "T003")]
    InvalidRequest,

    /// T004: The backend answered with a non-success status
    #[serde(rename = "T004")]
    ApiError,

    /// T005: Transport, decoding or other unclassified failure
    #[serde(rename = "T005")]
    Unexpected,

    /// T006: Configuration is invalid
    #[serde(rename = "T006")]
    ConfigInvalid,

    /// T007: Credential storage failed
    #[serde(rename = "T007")]
    StorageError,
}

impl ErrorCode {
    /// Returns the error code as a string (e.g., "T001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NoCredential => "T001",
            ErrorCode::SessionExpired => "T002",
            ErrorCode::InvalidRequest => "T003",
            ErrorCode::ApiError => "T004",
            ErrorCode::Unexpected => "T005",
            ErrorCode::ConfigInvalid => "T006",
            ErrorCode::StorageError => "T007",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CLI exit codes.
pub mod exit_code {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const GENERAL_ERROR: i32 = 1;
    /// Configuration error
    pub const CONFIG_ERROR: i32 = 2;
    /// Backend answered with an error status
    pub const API_ERROR: i32 = 3;
    /// Transport or decoding failure
    pub const UNEXPECTED_ERROR: i32 = 4;
    /// Missing or expired credential
    pub const AUTH_ERROR: i32 = 5;
    /// Command line argument error
    pub const CLI_ERROR: i32 = 64;
}

/// The main error type for tripwise.
#[derive(Debug, Error)]
pub enum TripwiseError {
    /// No bearer token is stored. Raised before any network call.
    #[error("Authentication required: please log in first")]
    NoCredential,

    /// The backend answered 401. The stored token has been erased.
    #[error("Session expired: please log in again")]
    SessionExpired,

    /// The backend answered 422 to an assistant query.
    #[error("Invalid request: the assistant could not process this prompt")]
    InvalidRequest,

    /// Any other non-success HTTP status.
    #[error("API error: {status} {status_text}")]
    Api { status: u16, status_text: String },

    /// Any fault that is not one of the above.
    #[error("Unexpected error while {operation}: {source}")]
    Unexpected {
        operation: Operation,
        #[source]
        source: BoxError,
    },

    /// Configuration file is invalid or cannot be loaded.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Credential storage could not be read or written.
    #[error("Credential storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TripwiseError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TripwiseError::NoCredential => ErrorCode::NoCredential,
            TripwiseError::SessionExpired => ErrorCode::SessionExpired,
            TripwiseError::InvalidRequest => ErrorCode::InvalidRequest,
            TripwiseError::Api { .. } => ErrorCode::ApiError,
            TripwiseError::Unexpected { .. } | TripwiseError::Json(_) => ErrorCode::Unexpected,
            TripwiseError::Config { .. } | TripwiseError::Yaml(_) => ErrorCode::ConfigInvalid,
            TripwiseError::Storage { .. } | TripwiseError::Io(_) => ErrorCode::StorageError,
        }
    }

    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TripwiseError::NoCredential | TripwiseError::SessionExpired => exit_code::AUTH_ERROR,
            TripwiseError::InvalidRequest | TripwiseError::Api { .. } => exit_code::API_ERROR,
            TripwiseError::Unexpected { .. } => exit_code::UNEXPECTED_ERROR,
            TripwiseError::Config { .. } | TripwiseError::Yaml(_) => exit_code::CONFIG_ERROR,
            _ => exit_code::GENERAL_ERROR,
        }
    }

    /// Wraps an arbitrary fault raised during `operation`.
    pub fn unexpected(
        operation: Operation,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        TripwiseError::Unexpected {
            operation,
            source: Box::new(source),
        }
    }

    /// Creates a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        TripwiseError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error with a message and source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        TripwiseError::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a storage error with a message.
    pub fn storage(message: impl Into<String>) -> Self {
        TripwiseError::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a storage error with a message and source.
    pub fn storage_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        TripwiseError::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true when the caller should send the user back to log in.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            TripwiseError::NoCredential | TripwiseError::SessionExpired
        )
    }
}

/// Result type alias for tripwise operations.
pub type Result<T> = std::result::Result<T, TripwiseError>;
