//! Periodic ingestion of Dhaka Stock Exchange share prices into a
//! TimescaleDB hypertable.
//!
//! This is a facade crate that re-exports functionality from the
//! motijheel workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use motijheel_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = TimeSeriesStore::connect(&StoreConfig::default()).await?;
//!     let activities = LiveActivities::new(ScrapeConfig::default(), store)?;
//!     let pipeline = Pipeline::new(
//!         activities,
//!         RetryPolicy::default(),
//!         TradingHours::default(),
//!     );
//!
//!     match pipeline.run(false).await? {
//!         RunOutcome::Completed { records } => println!("wrote {records} records"),
//!         RunOutcome::Skipped => println!("market closed, skipped"),
//!     }
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export record types
pub use motijheel_types::*;

// Re-export extraction
pub use motijheel_scrape::{
    Extractor, HttpPageSource, PageSource, SOURCE_ID, SOURCE_URL, ScrapeConfig, ScrapeError,
    parse_page,
};

// Re-export validation
pub use motijheel_validate::{ValidationIssue, ValidationReport, validate_batch};

// Re-export storage
pub use motijheel_store::{
    BucketStats, StoreConfig, StoreError, StoredObservation, TimeSeriesStore, setup,
};

// Re-export orchestration
pub use motijheel_pipeline::{
    Activities, LiveActivities, Pipeline, PipelineError, RetryPolicy, RunOutcome, Schedule, Step,
    TradingHours,
};

/// Prelude module for convenient imports.
///
/// ```
/// use motijheel_lib::prelude::*;
/// ```
pub mod prelude {
    pub use motijheel_types::{Observation, RawObservation, TimeField};

    pub use motijheel_scrape::{Extractor, HttpPageSource, PageSource, ScrapeConfig, ScrapeError};

    pub use motijheel_validate::{ValidationReport, validate_batch};

    pub use motijheel_store::{StoreConfig, StoreError, TimeSeriesStore};

    pub use motijheel_pipeline::{
        Activities, LiveActivities, Pipeline, PipelineError, RetryPolicy, RunOutcome, Schedule,
        TradingHours,
    };
}
