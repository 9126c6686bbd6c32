//! TimescaleDB persistence for motijheel observations.
//!
//! This crate owns the write path of the pipeline and the read-side
//! verification queries:
//!
//! - [`TimeSeriesStore`] - pooled handle; [`TimeSeriesStore::batch_insert`]
//!   persists a validated batch in one transaction with one statement
//! - [`StoredObservation`] / [`BucketStats`] - read-query row shapes
//! - [`setup`] - operator DDL and hypertable verification, not part of
//!   the ingestion path

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod queries;
pub mod setup;
mod writer;

pub use config::StoreConfig;
pub use error::StoreError;
pub use queries::{BucketStats, StoredObservation};
pub use writer::TimeSeriesStore;
