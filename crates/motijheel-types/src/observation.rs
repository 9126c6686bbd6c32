//! Observation record representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A validated observation: one (time, source, metric, value, metadata) fact.
///
/// Observations are write-once. They are constructed by the extractor,
/// frozen by the validator, and persisted as append-only rows; there is no
/// update or delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Instant the observation was taken (UTC).
    pub time: DateTime<Utc>,
    /// Fixed feed identifier, e.g. `dse_bd`.
    pub source: String,
    /// Instrument/series identifier (trading code). Never empty.
    pub metric_name: String,
    /// Primary numeric reading (last trade price). Always finite.
    pub value: f64,
    /// Auxiliary numeric fields keyed by [`crate::metadata::KEYS`].
    pub metadata: BTreeMap<String, f64>,
}

/// A candidate observation as constructed by the extractor, before any
/// schema checks have run.
///
/// Looser than [`Observation`]: the timestamp may still be text and the
/// metadata values are arbitrary JSON. The validator coerces or rejects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Observation timestamp, possibly still textual.
    pub time: TimeField,
    /// Feed identifier.
    pub source: String,
    /// Instrument/series identifier.
    pub metric_name: String,
    /// Primary numeric reading.
    pub value: f64,
    /// Auxiliary fields, unchecked.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// An observation timestamp as it arrives from a feed: either an absolute
/// instant, or an ISO-8601 string still to be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeField {
    /// Already an absolute instant.
    Instant(DateTime<Utc>),
    /// Textual timestamp, coerced during validation.
    Text(String),
}

impl From<DateTime<Utc>> for TimeField {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Instant(instant)
    }
}

impl From<&str> for TimeField {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_field_instant_roundtrip() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 3, 5, 30, 0).unwrap();
        let field = TimeField::from(instant);
        let json = serde_json::to_string(&field).unwrap();
        let back: TimeField = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TimeField::Instant(instant));
    }

    #[test]
    fn test_time_field_accepts_plain_text() {
        let back: TimeField = serde_json::from_str("\"not a timestamp\"").unwrap();
        assert_eq!(back, TimeField::Text("not a timestamp".to_string()));
    }

    #[test]
    fn test_observation_serializes_metadata_as_object() {
        let mut metadata = BTreeMap::new();
        metadata.insert("high".to_string(), 11.0);
        metadata.insert("low".to_string(), 9.5);

        let obs = Observation {
            time: Utc.with_ymd_and_hms(2025, 3, 3, 5, 30, 0).unwrap(),
            source: "dse_bd".to_string(),
            metric_name: "ABC".to_string(),
            value: 10.5,
            metadata,
        };

        let json = serde_json::to_value(&obs).unwrap();
        assert_eq!(json["metric_name"], "ABC");
        assert_eq!(json["metadata"]["high"], 11.0);
    }
}
