//! Batch validation failure reporting.

use std::fmt::{Display, Formatter};

/// A single schema violation within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Index of the offending record within the batch.
    pub index: usize,
    /// Field path within the record, e.g. `metadata.volume`.
    pub path: String,
    /// What was wrong with the field.
    pub reason: String,
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "record[{}].{}: {}", self.index, self.path, self.reason)
    }
}

/// Validation failure carrying every issue found across the whole batch,
/// not just the first, so batch-level schema drift can be diagnosed in
/// one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Records an issue against one field of one record.
    pub(crate) fn push(&mut self, index: usize, path: impl Into<String>, reason: impl Into<String>) {
        self.issues.push(ValidationIssue {
            index,
            path: path.into(),
            reason: reason.into(),
        });
    }

    /// All issues found, in record order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// True if no issues were recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed with {} issue(s): ", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_enumerates_every_issue() {
        let mut report = ValidationReport::default();
        report.push(0, "metric_name", "must not be empty");
        report.push(3, "metadata.volume", "expected a finite number, got \"n/a\"");

        let rendered = report.to_string();
        assert!(rendered.starts_with("validation failed with 2 issue(s)"));
        assert!(rendered.contains("record[0].metric_name: must not be empty"));
        assert!(rendered.contains("record[3].metadata.volume"));
    }
}
