//! Recurring run cadence for the worker loop.

use chrono::{DateTime, Datelike, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use std::time::Duration;

/// How often the worker triggers runs, and on which local weekdays.
///
/// The hour-of-day window lives in [`crate::TradingHours`]; the schedule
/// only decides cadence and trading days.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Interval between run triggers.
    pub cadence: Duration,
    /// Timezone the weekday is read in.
    pub tz: Tz,
    /// Local weekdays on which runs fire.
    pub trading_days: Vec<Weekday>,
}

impl Default for Schedule {
    /// Every 2 minutes, Sunday through Thursday, Asia/Dhaka.
    fn default() -> Self {
        Self {
            cadence: Duration::from_secs(120),
            tz: chrono_tz::Asia::Dhaka,
            trading_days: vec![
                Weekday::Sun,
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
            ],
        }
    }
}

impl Schedule {
    /// Whether the given instant falls on a trading weekday.
    #[must_use]
    pub fn is_trading_day(&self, now: DateTime<Utc>) -> bool {
        let weekday = self.tz.from_utc_datetime(&now.naive_utc()).weekday();
        self.trading_days.contains(&weekday)
    }
}
