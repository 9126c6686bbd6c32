//! Pipeline error taxonomy.

use motijheel_scrape::ScrapeError;
use motijheel_store::StoreError;
use motijheel_validate::ValidationReport;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use thiserror::Error;

/// One independently retryable unit within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Fetch and parse the source page.
    Scrape,
    /// Enforce the record schema over the scraped batch.
    Validate,
    /// Persist the validated batch.
    Insert,
}

impl Step {
    /// Step name for error messages and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scrape => "scrape",
            Self::Validate => "validate",
            Self::Insert => "insert",
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors terminating a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Extraction failed.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// The scraped batch failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationReport),

    /// The storage write failed (already rolled back).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A single step attempt exceeded its timeout. Counts against the
    /// step's retry budget like any other failure.
    #[error("{step} step timed out after {}s", .timeout.as_secs())]
    StepTimeout {
        /// The step that timed out.
        step: Step,
        /// The per-attempt timeout that elapsed.
        timeout: Duration,
    },

    /// A step exhausted its retry budget. Carries the last failure.
    #[error("{step} step failed after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        /// The step that gave up.
        step: Step,
        /// How many attempts were made.
        attempts: u32,
        /// The failure from the final attempt.
        #[source]
        source: Box<PipelineError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retries_exhausted_preserves_cause() {
        let error = PipelineError::RetriesExhausted {
            step: Step::Scrape,
            attempts: 3,
            source: Box::new(PipelineError::Scrape(ScrapeError::EmptyResult)),
        };
        let rendered = error.to_string();
        assert!(rendered.contains("scrape step failed after 3 attempt(s)"));
        assert!(rendered.contains("zero records"));
    }

    #[test]
    fn test_step_names() {
        assert_eq!(Step::Scrape.name(), "scrape");
        assert_eq!(Step::Validate.name(), "validate");
        assert_eq!(Step::Insert.name(), "insert");
    }
}
