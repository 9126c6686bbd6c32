//! Init-db command: create the schema and hypertable.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use motijheel_lib::prelude::*;
use motijheel_lib::setup;

/// Creates the extension, the `scraped_data` table, and the hypertable.
/// Safe to re-run against an already initialized database.
pub(crate) async fn init_db(config: &AppConfig) -> Result<()> {
    let store = TimeSeriesStore::connect(&config.store)
        .await
        .context("failed to connect to the time-series store")?;

    setup::init_schema(&store)
        .await
        .context("failed to initialize the schema")?;

    println!(
        "initialized scraped_data on {}:{}/{}",
        config.store.host, config.store.port, config.store.database
    );
    Ok(())
}
