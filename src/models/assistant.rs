//! Assistant query results.
//!
//! The backend tags every answer with a `type` field. Each tag carries its
//! own set of fields, so the result is modelled as one enum variant per tag
//! rather than a single struct full of optional members.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Answer to a free-text travel prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AssistantResult {
    /// A day-by-day trip plan.
    Itinerary {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        country: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cities: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        itinerary: Option<Vec<DayPlan>>,
        /// Fields beyond the ones this tag defines.
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    /// Points of interest for a location.
    Places {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        places: Option<Vec<Place>>,
        /// Fields beyond the ones this tag defines.
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    /// The prompt is outside what the assistant handles.
    Unsupported {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Fields beyond the ones this tag defines.
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    /// A free-form answer.
    General {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Fields beyond the ones this tag defines.
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    /// The backend failed to produce a structured answer.
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Raw model output kept for diagnostics.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        raw: Option<Value>,
        /// Fields beyond the ones this tag defines.
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl AssistantResult {
    /// Returns the wire tag of this result.
    pub fn kind(&self) -> &'static str {
        match self {
            AssistantResult::Itinerary { .. } => "itinerary",
            AssistantResult::Places { .. } => "places",
            AssistantResult::Unsupported { .. } => "unsupported",
            AssistantResult::General { .. } => "general",
            AssistantResult::Error { .. } => "error",
        }
    }

    /// Returns the fields that are not part of this tag's shape.
    pub fn extra(&self) -> &Map<String, Value> {
        match self {
            AssistantResult::Itinerary { extra, .. }
            | AssistantResult::Places { extra, .. }
            | AssistantResult::Unsupported { extra, .. }
            | AssistantResult::General { extra, .. }
            | AssistantResult::Error { extra, .. } => extra,
        }
    }

    /// Returns the human-readable message, for the tags that carry one.
    pub fn message(&self) -> Option<&str> {
        match self {
            AssistantResult::Unsupported { message, .. }
            | AssistantResult::General { message, .. }
            | AssistantResult::Error { message, .. } => message.as_deref(),
            AssistantResult::Itinerary { .. } | AssistantResult::Places { .. } => None,
        }
    }
}

/// One day of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<String>>,

    /// Any further fields the backend attaches to a day.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A suggested place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Any further fields the backend attaches to a place.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
