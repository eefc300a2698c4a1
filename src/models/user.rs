//! Authenticated user profile.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Backend user identifier. Either numeric or textual depending on the
/// account store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Numeric(id) => write!(f, "{}", id),
            UserId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Profile of the principal the bearer token belongs to.
///
/// `name` and `email` may be sent as `null` by the backend; they are kept
/// as `null` when re-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Any further profile fields the backend sends.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
