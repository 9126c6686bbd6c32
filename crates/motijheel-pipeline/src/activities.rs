//! Capability boundary between the orchestrator and the stages.

use crate::error::PipelineError;
use async_trait::async_trait;
use motijheel_scrape::{Extractor, HttpPageSource, ScrapeConfig};
use motijheel_store::TimeSeriesStore;
use motijheel_types::{Observation, RawObservation};

/// The three side-effecting steps of a run, injected into the
/// orchestrator so tests can substitute fakes for the network and the
/// database.
#[async_trait]
pub trait Activities: Send + Sync {
    /// Fetches the source page and extracts candidate records.
    ///
    /// # Errors
    ///
    /// Fails on navigation errors or a page yielding zero records.
    async fn scrape(&self) -> Result<Vec<RawObservation>, PipelineError>;

    /// Enforces the record schema over the scraped batch.
    ///
    /// # Errors
    ///
    /// Fails if any record violates the schema, rejecting the whole batch.
    async fn validate(&self, batch: Vec<RawObservation>)
    -> Result<Vec<Observation>, PipelineError>;

    /// Persists the validated batch atomically.
    ///
    /// # Errors
    ///
    /// Fails if the storage write cannot be committed.
    async fn insert(&self, batch: &[Observation]) -> Result<(), PipelineError>;
}

/// Production activities: HTTP extractor, in-process validator, and the
/// pooled time-series store.
#[derive(Debug)]
pub struct LiveActivities {
    extractor: Extractor<HttpPageSource>,
    store: TimeSeriesStore,
}

impl LiveActivities {
    /// Wires the live extractor and store.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new(config: ScrapeConfig, store: TimeSeriesStore) -> Result<Self, PipelineError> {
        let source = HttpPageSource::new(config)?;
        Ok(Self {
            extractor: Extractor::new(source),
            store,
        })
    }
}

#[async_trait]
impl Activities for LiveActivities {
    async fn scrape(&self) -> Result<Vec<RawObservation>, PipelineError> {
        Ok(self.extractor.extract().await?)
    }

    async fn validate(
        &self,
        batch: Vec<RawObservation>,
    ) -> Result<Vec<Observation>, PipelineError> {
        Ok(motijheel_validate::validate_batch(batch)?)
    }

    async fn insert(&self, batch: &[Observation]) -> Result<(), PipelineError> {
        Ok(self.store.batch_insert(batch).await?)
    }
}
