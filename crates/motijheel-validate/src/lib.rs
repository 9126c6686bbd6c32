//! Schema enforcement for scraped observation batches.
//!
//! The validator sits between the extractor and the store writer. It takes
//! a batch of loosely-typed candidates, coerces textual timestamps, checks
//! every numeric field for finiteness, and either passes the whole batch
//! through as validated [`motijheel_types::Observation`]s or rejects the
//! whole batch with a report of every issue found.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod report;
mod schema;

pub use report::{ValidationIssue, ValidationReport};
pub use schema::validate_batch;
