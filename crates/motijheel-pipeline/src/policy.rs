//! Retry and timeout policy, represented as data.

use std::time::Duration;

/// Per-step retry policy: attempt count, backoff curve, and per-attempt
/// timeout. Every step of a run gets its own independent budget from the
/// same policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per step, first try included.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff: Duration,
    /// Multiplier applied to the delay after each further failure.
    pub backoff_factor: f64,
    /// Upper bound on the delay between attempts.
    pub max_backoff: Duration,
    /// Wall-clock budget for a single attempt. A timed-out attempt counts
    /// as a failed attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    /// Production policy: 3 attempts, 10s initial backoff doubling up to
    /// 60s, 2 minutes per attempt.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(10),
            backoff_factor: 2.0,
            max_backoff: Duration::from_secs(60),
            attempt_timeout: Duration::from_secs(120),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based).
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let scaled = self.initial_backoff.as_secs_f64() * self.backoff_factor.powi(exponent as i32);
        Duration::from_secs_f64(scaled.min(self.max_backoff.as_secs_f64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_backoff, Duration::from_secs(10));
        assert_eq!(policy.attempt_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(1), Duration::from_secs(10));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(20));
        assert_eq!(policy.backoff_for(3), Duration::from_secs(40));
        assert_eq!(policy.backoff_for(4), Duration::from_secs(60)); // capped
        assert_eq!(policy.backoff_for(10), Duration::from_secs(60));
    }
}
