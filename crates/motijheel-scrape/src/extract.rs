//! Extraction of candidate records from the source page.

use crate::client::PageSource;
use crate::html;
use crate::row::StockRow;
use chrono::{DateTime, Utc};
use motijheel_types::RawObservation;
use thiserror::Error;

/// Fixed URL of the source page.
pub const SOURCE_URL: &str = "https://dsebd.org/latest_share_price_scroll_l.php";

/// Fixed feed identifier recorded on every observation.
pub const SOURCE_ID: &str = "dse_bd";

/// Errors surfaced by the extractor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    /// Transport or navigation failure, with the underlying cause.
    #[error("failed to fetch source page: {0}")]
    Navigation(String),

    /// Non-success HTTP status from the source.
    #[error("source page returned status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The page contained no table rows at all.
    #[error("no table rows found in source page")]
    TableMissing,

    /// No rows survived parsing. A zero-row page is treated as a broken
    /// scrape, never as a successful empty run.
    #[error("scrape produced zero records")]
    EmptyResult,
}

/// Extracts candidate records from a configured page source.
#[derive(Debug)]
pub struct Extractor<S> {
    source: S,
}

impl<S: PageSource> Extractor<S> {
    /// Creates an extractor over the given page source.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetches the source page and parses every body row into a candidate
    /// record, all stamped with the fetch time.
    ///
    /// # Errors
    ///
    /// Fails on navigation errors, a row-less page, or a page from which
    /// zero records survive parsing.
    pub async fn extract(&self) -> Result<Vec<RawObservation>, ScrapeError> {
        let page = self.source.fetch_page().await?;
        parse_page(&page, Utc::now())
    }
}

/// Parses page markup into candidate records observed at `scraped_at`.
///
/// The first row is the table header and is skipped. Rows with fewer than
/// 10 cells or an empty trading code are dropped silently; row order is
/// preserved for the rest.
///
/// # Errors
///
/// Returns [`ScrapeError::TableMissing`] if the page has no rows at all,
/// and [`ScrapeError::EmptyResult`] if no row survives parsing.
pub fn parse_page(
    page: &str,
    scraped_at: DateTime<Utc>,
) -> Result<Vec<RawObservation>, ScrapeError> {
    let rows = html::row_blocks(page);
    if rows.is_empty() {
        return Err(ScrapeError::TableMissing);
    }

    let records: Vec<RawObservation> = rows
        .iter()
        .skip(1) // header row
        .filter_map(|row| StockRow::from_cells(&html::cell_text(row)))
        .map(|row| row.into_raw(scraped_at, SOURCE_ID))
        .collect();

    if records.is_empty() {
        return Err(ScrapeError::EmptyResult);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Page source returning a fixed markup string.
    #[derive(Debug)]
    struct FixturePage(String);

    #[async_trait]
    impl PageSource for FixturePage {
        async fn fetch_page(&self) -> Result<String, ScrapeError> {
            Ok(self.0.clone())
        }
    }

    fn data_row(code: &str, ltp: &str) -> String {
        format!(
            "<tr><td>1</td><td><a href=\"x.php\">{code}</a></td><td>{ltp}</td>\
             <td>11.00</td><td>9.00</td><td>10.25</td><td>10.00</td><td>0.50</td>\
             <td>1,234</td><td>5.67</td><td>1,000</td></tr>"
        )
    }

    const HEADER: &str = "<tr><th>#</th><th>Trading Code</th><th>LTP</th><th>High</th>\
         <th>Low</th><th>Close</th><th>YCP</th><th>Change</th><th>Trades</th>\
         <th>Value</th><th>Volume</th></tr>";

    fn page(rows: &[String]) -> String {
        format!("<html><body><table>{HEADER}{}</table></body></html>", rows.join(""))
    }

    #[test]
    fn test_well_formed_rows_in_order() {
        let markup = page(&[data_row("ABC", "10.50"), data_row("XYZ", "5.00")]);
        let records = parse_page(&markup, Utc::now()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].metric_name, "ABC");
        assert_eq!(records[1].metric_name, "XYZ");
        assert!((records[0].value - 10.5).abs() < f64::EPSILON);
        assert!((records[1].value - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_rows_dropped_without_failing() {
        let markup = page(&[
            data_row("ABC", "10.50"),
            "<tr><td>broken</td><td>row</td></tr>".to_string(),
            data_row("XYZ", "5.00"),
            "<tr></tr>".to_string(),
        ]);
        let records = parse_page(&markup, Utc::now()).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.metric_name.as_str()).collect();
        assert_eq!(names, vec!["ABC", "XYZ"]);
    }

    #[test]
    fn test_header_only_page_fails() {
        let markup = page(&[]);
        assert_eq!(
            parse_page(&markup, Utc::now()),
            Err(ScrapeError::EmptyResult)
        );
    }

    #[test]
    fn test_rowless_page_fails() {
        assert_eq!(
            parse_page("<html><body>maintenance</body></html>", Utc::now()),
            Err(ScrapeError::TableMissing)
        );
    }

    #[test]
    fn test_price_with_thousands_separator() {
        let markup = page(&[data_row("GP", "1,234.5")]);
        let records = parse_page(&markup, Utc::now()).unwrap();
        assert!((records[0].value - 1234.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_count_cell_parses_to_zero() {
        let row = "<tr><td>1</td><td>ABC</td><td>10.50</td><td>11.00</td><td>9.00</td>\
             <td>10.25</td><td>10.00</td><td>0.50</td><td></td><td>5.67</td><td>500</td></tr>";
        let markup = page(&[row.to_string()]);
        let records = parse_page(&markup, Utc::now()).unwrap();
        assert_eq!(records[0].metadata["trade_count"], serde_json::json!(0));
    }

    #[tokio::test]
    async fn test_extractor_stamps_fetch_time() {
        let extractor = Extractor::new(FixturePage(page(&[data_row("ABC", "10.50")])));
        let before = Utc::now();
        let records = extractor.extract().await.unwrap();
        let after = Utc::now();
        match &records[0].time {
            motijheel_types::TimeField::Instant(t) => {
                assert!(*t >= before && *t <= after);
            }
            other => panic!("expected instant, got {other:?}"),
        }
    }
}
