//! Travel backend API client.
//!
//! Every call follows the same steps: read the bearer token, send one GET,
//! classify the status, decode the JSON body. All failures come back as a
//! [`TripwiseError`].

use super::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::config::Config;
use crate::credentials::{CredentialStore, DEFAULT_TOKEN_KEY};
use crate::error::{Result, TripwiseError};
use crate::models::{AssistantResult, RecommendationResult, SearchHistoryEntry, UserProfile};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Number of recommendations requested when the caller does not say.
pub const DEFAULT_TOP_K: i64 = 10;

/// Characters left as-is in a query component, matching JavaScript's
/// `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The requests the client knows how to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AssistantQuery,
    CurrentUser,
    Recommendations,
    SearchHistory,
}

impl Operation {
    /// Endpoint path relative to the backend origin.
    pub fn path(&self) -> &'static str {
        match self {
            Operation::AssistantQuery => "/travel/generate",
            Operation::CurrentUser => "/auth/me",
            Operation::Recommendations => "/recommendations/personalized",
            Operation::SearchHistory => "/recommendations/search-history",
        }
    }

    /// Short identifier used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AssistantQuery => "assistant_query",
            Operation::CurrentUser => "current_user",
            Operation::Recommendations => "recommendations",
            Operation::SearchHistory => "search_history",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::AssistantQuery => write!(f, "fetching the assistant response"),
            Operation::CurrentUser => write!(f, "fetching the current user"),
            Operation::Recommendations => write!(f, "fetching personalized recommendations"),
            Operation::SearchHistory => write!(f, "fetching search history"),
        }
    }
}

/// Authenticated client for the travel backend.
///
/// Cloning is cheap; clones share the transport and credential store.
#[derive(Clone)]
pub struct TravelClient {
    /// Backend origin without a trailing slash.
    base_url: String,
    /// Key the bearer token is stored under.
    token_key: String,
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
}

impl fmt::Debug for TravelClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TravelClient")
            .field("base_url", &self.base_url)
            .field("token_key", &self.token_key)
            .field("store", &self.store.name())
            .finish_non_exhaustive()
    }
}

impl TravelClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - Backend origin (e.g., "https://api.example.com")
    /// * `transport` - Sends the HTTP requests
    /// * `store` - Holds the bearer token
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();

        Self {
            base_url,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            transport,
            store,
        }
    }

    /// Creates a client using a reqwest transport and the file credential
    /// store described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = match config.api.timeout_seconds {
            Some(secs) => ReqwestTransport::with_timeout(Duration::from_secs(secs))?,
            None => ReqwestTransport::new()?,
        };
        let store = config.credentials.store()?;

        Ok(Self::new(&config.api.base_url, Arc::new(transport), Arc::new(store))
            .with_token_key(&config.credentials.key))
    }

    /// Reads and erases the token under `key` instead of the default.
    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    /// Returns the backend origin.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the key the bearer token is stored under.
    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    /// Returns the credential store.
    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    /// Asks the travel assistant about `prompt`.
    ///
    /// A 422 from the backend is reported as [`TripwiseError::InvalidRequest`].
    pub async fn fetch_assistant_response(&self, prompt: &str) -> Result<AssistantResult> {
        let query = format!("prompt={}", utf8_percent_encode(prompt, QUERY_COMPONENT));
        self.get_json(Operation::AssistantQuery, Some(query)).await
    }

    /// Returns the profile of the authenticated user.
    pub async fn fetch_current_user(&self) -> Result<UserProfile> {
        self.get_json(Operation::CurrentUser, None).await
    }

    /// Returns up to `top_k` personalized recommendations (default
    /// [`DEFAULT_TOP_K`]).
    ///
    /// The value is passed to the backend unchanged, negative or not.
    pub async fn fetch_personalized_recommendations(
        &self,
        top_k: Option<i64>,
    ) -> Result<RecommendationResult> {
        let top_k = top_k.unwrap_or(DEFAULT_TOP_K);
        self.get_json(Operation::Recommendations, Some(format!("top_k={}", top_k)))
            .await
    }

    /// Returns the user's past queries in backend order.
    ///
    /// An object without a usable `search_history` field yields an empty
    /// list rather than an error. A body that is not an object is
    /// `Unexpected`.
    pub async fn fetch_search_history(&self) -> Result<Vec<SearchHistoryEntry>> {
        let operation = Operation::SearchHistory;
        let body: Map<String, Value> = self.get_json(operation, None).await?;

        match body.get("search_history") {
            Some(history) if is_truthy(history) => serde_json::from_value(history.clone())
                .map_err(|e| TripwiseError::unexpected(operation, e)),
            _ => {
                debug!("Response has no search_history, returning empty list");
                Ok(Vec::new())
            }
        }
    }

    /// Sends the request for `operation` and decodes the body as `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        query: Option<String>,
    ) -> Result<T> {
        let body = self.send(operation, query).await?;
        serde_json::from_slice(&body).map_err(|e| TripwiseError::unexpected(operation, e))
    }

    async fn send(&self, operation: Operation, query: Option<String>) -> Result<Vec<u8>> {
        let token = self
            .store
            .get(&self.token_key)
            .map_err(|e| TripwiseError::unexpected(operation, e))?
            .ok_or(TripwiseError::NoCredential)?;

        let mut url = format!("{}{}", self.base_url, operation.path());
        if let Some(query) = query {
            url.push('?');
            url.push_str(&query);
        }

        let request = HttpRequest::get(url)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json");

        debug!(operation = operation.name(), url = %request.url, "Sending request");

        let response = self
            .transport
            .get(request)
            .await
            .map_err(|e| TripwiseError::unexpected(operation, e))?;

        debug!(
            operation = operation.name(),
            status = response.status,
            "Received response"
        );

        self.check_status(operation, response)
    }

    /// Maps non-success statuses to errors and hands back the body otherwise.
    fn check_status(&self, operation: Operation, response: HttpResponse) -> Result<Vec<u8>> {
        match response.status {
            401 => {
                warn!(
                    operation = operation.name(),
                    "Backend rejected the credential, erasing it"
                );
                if let Err(e) = self.store.remove(&self.token_key) {
                    warn!(error = %e, "Failed to erase rejected credential");
                }
                Err(TripwiseError::SessionExpired)
            }
            422 if operation == Operation::AssistantQuery => Err(TripwiseError::InvalidRequest),
            _ if !response.is_success() => Err(TripwiseError::Api {
                status: response.status,
                status_text: response.status_text,
            }),
            _ => Ok(response.body),
        }
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use serde_json::json;

    #[test]
    fn test_operation_paths() {
        assert_eq!(Operation::AssistantQuery.path(), "/travel/generate");
        assert_eq!(Operation::CurrentUser.path(), "/auth/me");
        assert_eq!(
            Operation::Recommendations.path(),
            "/recommendations/personalized"
        );
        assert_eq!(
            Operation::SearchHistory.path(),
            "/recommendations/search-history"
        );
    }

    #[test]
    fn test_query_component_encoding() {
        let encode = |s| utf8_percent_encode(s, QUERY_COMPONENT).to_string();

        assert_eq!(encode("trip to Rome"), "trip%20to%20Rome");
        assert_eq!(encode("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode("it's (fun)!"), "it's%20(fun)!");
        assert_eq!(encode("Zürich"), "Z%C3%BCrich");
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(1)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = Arc::new(ReqwestTransport::new().unwrap());
        let store = Arc::new(MemoryCredentialStore::new());
        let client = TravelClient::new("http://localhost:8000/", transport, store);

        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.token_key(), DEFAULT_TOKEN_KEY);
    }

    #[test]
    fn test_base_url_whitespace_trimmed() {
        let transport = Arc::new(ReqwestTransport::new().unwrap());
        let store = Arc::new(MemoryCredentialStore::new());
        let client = TravelClient::new("  http://localhost:8000/ \n", transport, store);

        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.api.base_url = "https://travel.example.com".to_string();
        config.api.timeout_seconds = Some(10);
        config.credentials.path = Some(dir.path().join("credentials.json"));
        config.credentials.key = "session".to_string();

        let client = TravelClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://travel.example.com");
        assert_eq!(client.token_key(), "session");
        assert_eq!(client.store().name(), "file");
    }
}
