//! Raw table-row shape and permissive numeric parsing.

use chrono::{DateTime, Utc};
use motijheel_types::{RawObservation, TimeField};
use serde_json::json;
use std::collections::BTreeMap;

/// One body row of the share-price table, as parsed from markup.
///
/// Transient: exists only inside the extractor before being mapped into
/// [`RawObservation`] shape via [`StockRow::into_raw`].
#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    /// Trading code (ticker symbol).
    pub trading_code: String,
    /// Last trade price.
    pub ltp: f64,
    /// Day high.
    pub high: f64,
    /// Day low.
    pub low: f64,
    /// Closing price.
    pub close_price: f64,
    /// Yesterday's closing price.
    pub ycp: f64,
    /// Price change from previous close.
    pub change: f64,
    /// Number of trades executed.
    pub trade_count: i64,
    /// Total value traded, in millions.
    pub value_mn: f64,
    /// Total volume of shares traded.
    pub volume: i64,
}

impl StockRow {
    /// Builds a row from table cells.
    ///
    /// Returns `None` for rows that are not data rows: fewer than 10 cells
    /// (malformed markup is expected and non-fatal at row granularity), or
    /// an empty trading code after trimming.
    #[must_use]
    pub fn from_cells(cells: &[String]) -> Option<Self> {
        if cells.len() < 10 {
            return None;
        }
        let cell = |index: usize| cells.get(index).map_or("", String::as_str);

        let trading_code = cell(1).trim().to_string();
        if trading_code.is_empty() {
            return None;
        }

        Some(Self {
            trading_code,
            ltp: parse_decimal(cell(2)),
            high: parse_decimal(cell(3)),
            low: parse_decimal(cell(4)),
            close_price: parse_decimal(cell(5)),
            ycp: parse_decimal(cell(6)),
            change: parse_decimal(cell(7)),
            trade_count: parse_count(cell(8)),
            value_mn: parse_decimal(cell(9)),
            volume: parse_count(cell(10)),
        })
    }

    /// Maps the row into the pipeline's candidate record shape, observed
    /// at `scraped_at` and attributed to `source`.
    #[must_use]
    pub fn into_raw(self, scraped_at: DateTime<Utc>, source: &str) -> RawObservation {
        let mut metadata = BTreeMap::new();
        metadata.insert("high".to_string(), json!(self.high));
        metadata.insert("low".to_string(), json!(self.low));
        metadata.insert("close_price".to_string(), json!(self.close_price));
        metadata.insert("ycp".to_string(), json!(self.ycp));
        metadata.insert("change".to_string(), json!(self.change));
        metadata.insert("trade_count".to_string(), json!(self.trade_count));
        metadata.insert("value_mn".to_string(), json!(self.value_mn));
        metadata.insert("volume".to_string(), json!(self.volume));

        RawObservation {
            time: TimeField::Instant(scraped_at),
            source: source.to_string(),
            metric_name: self.trading_code,
            value: self.ltp,
            metadata,
        }
    }
}

/// Permissive decimal parse: thousands separators are stripped, and empty,
/// non-numeric, or non-finite text coerces to `0` rather than failing.
#[must_use]
pub fn parse_decimal(text: &str) -> f64 {
    text.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Permissive integer parse with the same zero-on-failure policy as
/// [`parse_decimal`].
#[must_use]
pub fn parse_count(text: &str) -> i64 {
    text.trim().replace(',', "").parse::<i64>().unwrap_or(0)
}
