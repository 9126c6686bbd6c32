//! Core types for the motijheel DSE ingestion pipeline.
//!
//! This crate provides the record shapes that flow through the pipeline:
//!
//! - [`Observation`] - A validated observation, the unit persisted to storage
//! - [`RawObservation`] - A candidate observation as produced by the extractor
//! - [`TimeField`] - An observation timestamp, either an instant or text
//! - [`metadata::KEYS`] - The fixed auxiliary-field schema

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod metadata;
mod observation;

pub use observation::{Observation, RawObservation, TimeField};
