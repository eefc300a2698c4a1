//! Search history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One past query made by the user, in the order the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub query: String,

    /// Timestamp as sent by the backend, kept in its serialized form.
    pub timestamp: String,

    /// Kind of answer the query produced (e.g. "itinerary", "places").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
}

impl SearchHistoryEntry {
    /// Parses [`timestamp`](Self::timestamp) as an RFC 3339 instant.
    ///
    /// Returns `None` when the backend sent something that is not RFC 3339.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_without_response_type() {
        let entry: SearchHistoryEntry =
            serde_json::from_str(r#"{"query": "paris", "timestamp": "2024-01-01T00:00:00Z"}"#)
                .unwrap();

        assert_eq!(entry.query, "paris");
        assert!(entry.response_type.is_none());

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("response_type").is_none());
    }

    #[test]
    fn test_timestamp_utc() {
        let entry = SearchHistoryEntry {
            query: "lisbon".to_string(),
            timestamp: "2024-03-05T10:30:00+02:00".to_string(),
            response_type: Some("places".to_string()),
        };

        assert_eq!(
            entry.timestamp_utc(),
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_timestamp_utc_invalid() {
        let entry = SearchHistoryEntry {
            query: "lisbon".to_string(),
            timestamp: "yesterday".to_string(),
            response_type: None,
        };

        assert!(entry.timestamp_utc().is_none());
    }
}
