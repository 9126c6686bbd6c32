//! Transactional batch writes into the time-series table.

use crate::config::StoreConfig;
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use motijheel_types::Observation;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// The single bulk insert statement. One statement carries the whole
/// batch, so the statement count is independent of batch size.
const INSERT_BATCH_SQL: &str = "\
INSERT INTO scraped_data (time, source, metric_name, value, metadata) \
SELECT * FROM UNNEST($1::timestamptz[], $2::varchar[], $3::varchar[], $4::float8[], $5::jsonb[])";

/// Handle on the time-series store. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct TimeSeriesStore {
    pool: PgPool,
}

impl TimeSeriesStore {
    /// Connects a pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] if the database is unreachable.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await
            .map_err(StoreError::Connect)?;
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub const fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Persists the whole batch as one atomic unit.
    ///
    /// An empty batch succeeds without touching storage. Otherwise one
    /// connection is checked out, one transaction is opened, the single
    /// bulk statement runs, and the transaction commits. On any failure
    /// the transaction is rolled back and the insert error re-raised;
    /// the connection returns to the pool on every path.
    ///
    /// Inserts are append-only with no deduplication: re-inserting the
    /// same logical batch produces duplicate rows (at-least-once).
    ///
    /// # Errors
    ///
    /// Returns the underlying query error after rollback.
    pub async fn batch_insert(&self, batch: &[Observation]) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }

        let columns = ColumnArrays::from_batch(batch)?;
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(INSERT_BATCH_SQL)
            .bind(&columns.times)
            .bind(&columns.sources)
            .bind(&columns.metric_names)
            .bind(&columns.values)
            .bind(&columns.metadata)
            .execute(&mut *tx)
            .await;

        match result {
            Ok(_) => {
                tx.commit().await?;
                Ok(())
            }
            Err(insert_error) => {
                // Re-raise the insert failure, not the rollback outcome.
                let _ = tx.rollback().await;
                Err(insert_error.into())
            }
        }
    }
}

/// Per-column arrays for the bulk insert statement.
#[derive(Debug, Default)]
struct ColumnArrays {
    times: Vec<DateTime<Utc>>,
    sources: Vec<String>,
    metric_names: Vec<String>,
    values: Vec<f64>,
    metadata: Vec<serde_json::Value>,
}

impl ColumnArrays {
    fn from_batch(batch: &[Observation]) -> Result<Self, StoreError> {
        let mut columns = Self {
            times: Vec::with_capacity(batch.len()),
            sources: Vec::with_capacity(batch.len()),
            metric_names: Vec::with_capacity(batch.len()),
            values: Vec::with_capacity(batch.len()),
            metadata: Vec::with_capacity(batch.len()),
        };
        for observation in batch {
            columns.times.push(observation.time);
            columns.sources.push(observation.source.clone());
            columns.metric_names.push(observation.metric_name.clone());
            columns.values.push(observation.value);
            columns
                .metadata
                .push(serde_json::to_value(&observation.metadata)?);
        }
        Ok(columns)
    }
}
