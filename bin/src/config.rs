//! Environment-driven configuration for the CLI.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use motijheel_lib::{Schedule, StoreConfig, TradingHours};
use std::env;
use std::time::Duration;

/// Everything the CLI needs to wire a worker or a one-shot run.
#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    pub(crate) store: StoreConfig,
    pub(crate) hours: TradingHours,
    pub(crate) schedule: Schedule,
}

impl AppConfig {
    /// Reads configuration from the environment, falling back to defaults
    /// for anything unset.
    ///
    /// Database: `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD`.
    /// Gate and cadence: `TRADING_OPEN_HOUR`, `TRADING_CLOSE_HOUR`,
    /// `TRADING_TIMEZONE`, `SCRAPE_CADENCE_SECS`.
    pub(crate) fn from_env() -> Result<Self> {
        let mut store = StoreConfig::default();
        if let Ok(host) = env::var("DB_HOST") {
            store.host = host;
        }
        if let Ok(port) = env::var("DB_PORT") {
            store.port = port.parse().context("DB_PORT must be a port number")?;
        }
        if let Ok(database) = env::var("DB_NAME") {
            store.database = database;
        }
        if let Ok(user) = env::var("DB_USER") {
            store.user = user;
        }
        if let Ok(password) = env::var("DB_PASSWORD") {
            store.password = password;
        }

        let mut hours = TradingHours::default();
        if let Ok(open) = env::var("TRADING_OPEN_HOUR") {
            hours.open_hour = open
                .parse()
                .context("TRADING_OPEN_HOUR must be an hour (0-23)")?;
        }
        if let Ok(close) = env::var("TRADING_CLOSE_HOUR") {
            hours.close_hour = close
                .parse()
                .context("TRADING_CLOSE_HOUR must be an hour (0-23)")?;
        }

        let mut schedule = Schedule::default();
        if let Ok(tz) = env::var("TRADING_TIMEZONE") {
            let tz: Tz = tz
                .parse()
                .ok()
                .context("TRADING_TIMEZONE must be an IANA timezone name")?;
            hours.tz = tz;
            schedule.tz = tz;
        }
        if let Ok(cadence) = env::var("SCRAPE_CADENCE_SECS") {
            let secs: u64 = cadence
                .parse()
                .context("SCRAPE_CADENCE_SECS must be a number of seconds")?;
            schedule.cadence = Duration::from_secs(secs.max(1));
        }

        Ok(Self {
            store,
            hours,
            schedule,
        })
    }
}
