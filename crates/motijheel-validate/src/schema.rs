//! Schema checks over extractor output.

use crate::report::ValidationReport;
use chrono::{DateTime, Utc};
use motijheel_types::{Observation, RawObservation, TimeField, metadata};
use std::collections::BTreeMap;

/// Validates a whole candidate batch, coercing textual timestamps to
/// absolute instants.
///
/// All-or-nothing: if any record fails any check, the entire batch is
/// rejected and the report carries every issue found across the batch.
/// Metadata keys outside the fixed schema are dropped from the output.
///
/// # Errors
///
/// Returns a [`ValidationReport`] enumerating every violation.
pub fn validate_batch(batch: Vec<RawObservation>) -> Result<Vec<Observation>, ValidationReport> {
    let mut report = ValidationReport::default();
    let mut validated = Vec::with_capacity(batch.len());

    for (index, raw) in batch.into_iter().enumerate() {
        if let Some(observation) = validate_record(index, raw, &mut report) {
            validated.push(observation);
        }
    }

    if report.is_clean() {
        Ok(validated)
    } else {
        Err(report)
    }
}

/// Checks one record, recording issues instead of short-circuiting so a
/// single pass reports everything wrong with the batch.
fn validate_record(
    index: usize,
    raw: RawObservation,
    report: &mut ValidationReport,
) -> Option<Observation> {
    let issues_before = report.issues().len();

    let time = match coerce_time(&raw.time) {
        Ok(instant) => Some(instant),
        Err(reason) => {
            report.push(index, "time", reason);
            None
        }
    };

    if raw.metric_name.trim().is_empty() {
        report.push(index, "metric_name", "must not be empty");
    }

    if !raw.value.is_finite() {
        report.push(index, "value", format!("expected a finite number, got {}", raw.value));
    }

    let mut metadata_out = BTreeMap::new();
    for key in metadata::KEYS {
        match raw.metadata.get(key) {
            None => report.push(index, format!("metadata.{key}"), "required field is missing"),
            Some(value) => match value.as_f64().filter(|n| n.is_finite()) {
                Some(number) => {
                    metadata_out.insert(key.to_string(), number);
                }
                None => report.push(
                    index,
                    format!("metadata.{key}"),
                    format!("expected a finite number, got {value}"),
                ),
            },
        }
    }

    if report.issues().len() > issues_before {
        return None;
    }

    Some(Observation {
        time: time?,
        source: raw.source,
        metric_name: raw.metric_name,
        value: raw.value,
        metadata: metadata_out,
    })
}

/// Coerces a time field to an absolute instant. Instants pass through
/// unchanged; text must parse as RFC 3339.
fn coerce_time(time: &TimeField) -> Result<DateTime<Utc>, String> {
    match time {
        TimeField::Instant(instant) => Ok(*instant),
        TimeField::Text(text) => DateTime::parse_from_rfc3339(text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|e| format!("not a valid RFC 3339 timestamp ({e}): {text:?}")),
    }
}
