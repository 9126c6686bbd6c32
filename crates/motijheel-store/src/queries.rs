//! Read-side queries. Pure reads, no write side effects; every
//! user-influenced value is bound as a parameter.

use crate::error::StoreError;
use crate::writer::TimeSeriesStore;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A stored observation row as returned by read queries.
#[derive(Debug, Clone, FromRow)]
pub struct StoredObservation {
    /// Observation instant.
    pub time: DateTime<Utc>,
    /// Feed identifier.
    pub source: String,
    /// Series identifier.
    pub metric_name: String,
    /// Primary value.
    pub value: f64,
    /// Auxiliary fields as stored.
    pub metadata: serde_json::Value,
}

/// One time bucket of aggregated values for a series.
#[derive(Debug, Clone, FromRow)]
pub struct BucketStats {
    /// Bucket start.
    pub bucket: DateTime<Utc>,
    /// Series identifier.
    pub metric_name: String,
    /// Mean value within the bucket.
    pub avg_value: f64,
    /// Minimum value within the bucket.
    pub min_value: f64,
    /// Maximum value within the bucket.
    pub max_value: f64,
    /// Number of observations in the bucket.
    pub sample_count: i64,
}

impl TimeSeriesStore {
    /// Latest stored row per series, capped at `limit` series.
    ///
    /// # Errors
    ///
    /// Returns the underlying query error.
    pub async fn latest(&self, limit: i64) -> Result<Vec<StoredObservation>, StoreError> {
        let rows = sqlx::query_as::<_, StoredObservation>(
            "SELECT DISTINCT ON (metric_name) time, source, metric_name, value, metadata \
             FROM scraped_data \
             ORDER BY metric_name, time DESC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    /// Time-bucketed aggregation for one series over a window, newest
    /// bucket first. `interval` is a Postgres interval string such as
    /// `1 hour`.
    ///
    /// # Errors
    ///
    /// Returns the underlying query error.
    pub async fn bucketed(
        &self,
        metric: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: &str,
    ) -> Result<Vec<BucketStats>, StoreError> {
        let rows = sqlx::query_as::<_, BucketStats>(
            "SELECT time_bucket($1::interval, time) AS bucket, metric_name, \
             avg(value) AS avg_value, min(value) AS min_value, max(value) AS max_value, \
             count(*) AS sample_count \
             FROM scraped_data \
             WHERE metric_name = $2 AND time BETWEEN $3 AND $4 \
             GROUP BY bucket, metric_name \
             ORDER BY bucket DESC",
        )
        .bind(interval)
        .bind(metric)
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    /// Total number of stored rows.
    ///
    /// # Errors
    ///
    /// Returns the underlying query error.
    pub async fn row_count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM scraped_data")
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }
}
