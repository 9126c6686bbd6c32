//! Page fetching and table extraction for the DSE share-price feed.
//!
//! This crate implements the scrape stage of the pipeline:
//!
//! - [`HttpPageSource`] - HTTP fetch of the source page with a browser
//!   User-Agent and navigation timeout
//! - [`PageSource`] - trait boundary so tests can supply fixture pages
//! - [`Extractor`] - parses table body rows into candidate records
//! - [`StockRow`] - transient raw row shape with permissive numeric parsing

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod extract;
mod html;
mod row;

pub use client::{HttpPageSource, PageSource, ScrapeConfig};
pub use extract::{Extractor, SOURCE_ID, SOURCE_URL, ScrapeError, parse_page};
pub use row::{StockRow, parse_count, parse_decimal};
