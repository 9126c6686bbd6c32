//! Worker command: the long-running scheduled scraper.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use motijheel_lib::prelude::*;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

/// Runs the pipeline on the configured cadence until interrupted.
///
/// The database must be reachable at startup. After that, each tick is
/// independent: a failed run is logged and the loop keeps going, so a
/// transient outage never kills the worker.
pub(crate) async fn worker(config: &AppConfig) -> Result<()> {
    let store = TimeSeriesStore::connect(&config.store)
        .await
        .context("failed to connect to the time-series store")?;
    let activities = LiveActivities::new(ScrapeConfig::default(), store)
        .context("failed to build the HTTP client")?;
    let pipeline = Pipeline::new(activities, RetryPolicy::default(), config.hours.clone());
    let schedule = config.schedule.clone();

    println!(
        "worker started: every {}s, hours {:02}:00-{:02}:59 {}",
        schedule.cadence.as_secs(),
        config.hours.open_hour,
        config.hours.close_hour,
        config.hours.tz,
    );

    let mut interval = tokio::time::interval(schedule.cadence);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let now = chrono::Utc::now();

        if !schedule.is_trading_day(now) {
            continue;
        }

        let run_id = Uuid::new_v4();
        match pipeline.run_at(now, false).await {
            Ok(RunOutcome::Completed { records }) => {
                println!("run {run_id}: wrote {records} records");
            }
            Ok(RunOutcome::Skipped) => {}
            Err(error) => {
                eprintln!("run {run_id}: {error}");
            }
        }
    }
}
