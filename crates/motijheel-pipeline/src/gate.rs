//! Market-hours gate.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Wall-clock window during which runs are allowed to proceed.
///
/// The check is hour-granular in the exchange's local timezone: a run at
/// any minute of the closing hour is still inside the window.
#[derive(Debug, Clone)]
pub struct TradingHours {
    /// First hour (local, 0-23) of the window.
    pub open_hour: u32,
    /// Last hour (local, 0-23) of the window, inclusive.
    pub close_hour: u32,
    /// Exchange timezone the hours are read in.
    pub tz: Tz,
}

impl Default for TradingHours {
    /// Dhaka Stock Exchange hours: 10:00 through 14:59, Asia/Dhaka.
    fn default() -> Self {
        Self {
            open_hour: 10,
            close_hour: 14,
            tz: chrono_tz::Asia::Dhaka,
        }
    }
}

impl TradingHours {
    /// Whether the given instant falls inside the trading window.
    #[must_use]
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        let hour = self.tz.from_utc_datetime(&now.naive_utc()).hour();
        hour >= self.open_hour && hour <= self.close_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(hour: u32, minute: u32) -> DateTime<Utc> {
        // 2025-03-03 is a Monday, a Dhaka trading day.
        Utc.with_ymd_and_hms(2025, 3, 3, hour, minute, 0).single().unwrap()
    }

    #[test]
    fn test_closed_before_open() {
        // 07:00 Dhaka.
        assert!(!TradingHours::default().is_open(utc(1, 0)));
    }

    #[test]
    fn test_open_mid_session() {
        // 11:00 Dhaka.
        assert!(TradingHours::default().is_open(utc(5, 0)));
    }

    #[test]
    fn test_closing_hour_is_inclusive() {
        // 14:30 Dhaka.
        assert!(TradingHours::default().is_open(utc(8, 30)));
    }

    #[test]
    fn test_closed_after_close() {
        // 15:00 Dhaka.
        assert!(!TradingHours::default().is_open(utc(9, 0)));
    }

    #[test]
    fn test_boundary_minutes() {
        // 09:59 Dhaka closed, 10:00 Dhaka open.
        assert!(!TradingHours::default().is_open(utc(3, 59)));
        assert!(TradingHours::default().is_open(utc(4, 0)));
    }
}
