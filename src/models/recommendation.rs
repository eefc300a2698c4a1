//! Personalized recommendations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single recommended destination. Ranking and score semantics belong to
/// the backend.
///
/// Descriptive fields may come back as `null`; they re-encode as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub score: Option<f64>,

    /// Any further fields the backend attaches to a recommendation.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Recommendations together with the queries that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<Recommendation>,

    pub search_queries: Vec<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
