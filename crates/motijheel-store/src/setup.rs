//! Operator schema setup and verification.
//!
//! DDL lives here and is issued only by the `init-db` and `verify` CLI
//! commands. The ingestion path treats `scraped_data` as an existing flat
//! write target and never runs DDL.

use crate::error::StoreError;
use crate::writer::TimeSeriesStore;
use sqlx::FromRow;

/// Creates the timescaledb extension, the `scraped_data` table, and the
/// hypertable, each only if absent. Safe to re-run.
///
/// # Errors
///
/// Returns the underlying query error.
pub async fn init_schema(store: &TimeSeriesStore) -> Result<(), StoreError> {
    sqlx::query("CREATE EXTENSION IF NOT EXISTS timescaledb CASCADE")
        .execute(store.pool())
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS scraped_data ( \
             time        TIMESTAMPTZ      NOT NULL, \
             source      VARCHAR(255)     NOT NULL, \
             metric_name VARCHAR(255)     NOT NULL, \
             value       DOUBLE PRECISION NOT NULL, \
             metadata    JSONB            NOT NULL \
         )",
    )
    .execute(store.pool())
    .await?;

    sqlx::query("SELECT create_hypertable('scraped_data', 'time', if_not_exists => TRUE)")
        .execute(store.pool())
        .await?;

    Ok(())
}

/// Hypertable summary row for verification output.
#[derive(Debug, Clone, FromRow)]
pub struct HypertableInfo {
    /// Hypertable name.
    pub hypertable_name: String,
    /// Number of chunks currently backing the hypertable.
    pub num_chunks: i64,
}

/// Looks up the hypertable backing `scraped_data`, if any.
///
/// # Errors
///
/// Returns the underlying query error.
pub async fn hypertable_info(store: &TimeSeriesStore) -> Result<Option<HypertableInfo>, StoreError> {
    let info = sqlx::query_as::<_, HypertableInfo>(
        "SELECT hypertable_name, num_chunks::bigint AS num_chunks \
         FROM timescaledb_information.hypertables \
         WHERE hypertable_name = 'scraped_data'",
    )
    .fetch_optional(store.pool())
    .await?;
    Ok(info)
}
