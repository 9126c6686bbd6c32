//! Run orchestration for the motijheel ingestion pipeline.
//!
//! A run is one pass of Gate -> Scrape -> Validate -> Insert:
//!
//! - [`Activities`] - capability boundary injected into the orchestrator;
//!   [`LiveActivities`] wires the real extractor, validator, and store
//! - [`Pipeline`] - step sequencing and retry enforcement
//! - [`RetryPolicy`] - per-step retry/backoff/timeout policy as data
//! - [`TradingHours`] - the wall-clock gate
//! - [`Schedule`] - the recurring cadence for the worker loop

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod activities;
mod error;
mod gate;
mod policy;
mod run;
mod schedule;

pub use activities::{Activities, LiveActivities};
pub use error::{PipelineError, Step};
pub use gate::TradingHours;
pub use policy::RetryPolicy;
pub use run::{Pipeline, RunOutcome};
pub use schedule::Schedule;
