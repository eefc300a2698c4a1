//! Backend API configuration.

use serde::{Deserialize, Serialize};

/// Default backend origin.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin, e.g. "https://api.example.com".
    pub base_url: String,

    /// Optional per-request timeout for the HTTP transport.
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}
