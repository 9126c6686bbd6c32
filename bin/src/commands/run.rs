//! Run command: trigger a single pipeline run.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use motijheel_lib::prelude::*;

/// Executes one Gate -> Scrape -> Validate -> Insert pass and reports the
/// outcome.
pub(crate) async fn run_once(config: &AppConfig, force: bool) -> Result<()> {
    let store = TimeSeriesStore::connect(&config.store)
        .await
        .context("failed to connect to the time-series store")?;
    let activities = LiveActivities::new(ScrapeConfig::default(), store)
        .context("failed to build the HTTP client")?;
    let pipeline = Pipeline::new(activities, RetryPolicy::default(), config.hours.clone());

    match pipeline.run(force).await? {
        RunOutcome::Completed { records } => {
            println!("completed: wrote {records} records");
        }
        RunOutcome::Skipped => {
            println!(
                "skipped: outside trading hours ({:02}:00-{:02}:59 {}); use --force to bypass",
                config.hours.open_hour, config.hours.close_hour, config.hours.tz,
            );
        }
    }
    Ok(())
}
