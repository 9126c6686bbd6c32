//! Verify command: inspect what the scraper has written.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use motijheel_lib::prelude::*;
use motijheel_lib::setup;

/// Prints hypertable status, the row count, the latest row per series,
/// and an hourly aggregation for one series over the last 24 hours.
pub(crate) async fn verify(config: &AppConfig, limit: i64, metric: Option<&str>) -> Result<()> {
    let store = TimeSeriesStore::connect(&config.store)
        .await
        .context("failed to connect to the time-series store")?;

    match setup::hypertable_info(&store).await? {
        Some(info) => println!(
            "hypertable: {} ({} chunk(s))",
            info.hypertable_name, info.num_chunks
        ),
        None => println!("hypertable: not found (run `motijheel init-db`)"),
    }

    let total = store.row_count().await?;
    println!("rows: {total}");

    let latest = store.latest(limit).await?;
    if latest.is_empty() {
        println!("no data yet");
        return Ok(());
    }

    println!("\n{:<12} {:>10}  {}", "CODE", "LTP", "TIME");
    for row in &latest {
        println!(
            "{:<12} {:>10.2}  {}",
            row.metric_name,
            row.value,
            row.time.format("%Y-%m-%d %H:%M:%S")
        );
    }

    let metric = metric
        .map(ToString::to_string)
        .or_else(|| latest.first().map(|row| row.metric_name.clone()));
    let Some(metric) = metric else {
        return Ok(());
    };

    let end = Utc::now();
    let start = end - Duration::hours(24);
    let buckets = store.bucketed(&metric, start, end, "1 hour").await?;

    println!("\n{metric}, hourly over the last 24h:");
    println!(
        "{:<22} {:>10} {:>10} {:>10} {:>8}",
        "BUCKET", "AVG", "MIN", "MAX", "SAMPLES"
    );
    for bucket in &buckets {
        println!(
            "{:<22} {:>10.2} {:>10.2} {:>10.2} {:>8}",
            bucket.bucket.format("%Y-%m-%d %H:%M"),
            bucket.avg_value,
            bucket.min_value,
            bucket.max_value,
            bucket.sample_count
        );
    }

    Ok(())
}
