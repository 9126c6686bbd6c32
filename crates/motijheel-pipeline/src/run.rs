//! Step sequencing and retry enforcement for one run.

use crate::activities::Activities;
use crate::error::{PipelineError, Step};
use crate::gate::TradingHours;
use crate::policy::RetryPolicy;
use chrono::{DateTime, Utc};
use std::future::Future;

/// Result of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The gate was closed; nothing was fetched or written.
    Skipped,
    /// The full Scrape -> Validate -> Insert sequence committed.
    Completed {
        /// Number of observations written.
        records: usize,
    },
}

/// One-shot orchestrator: gate check, then the three steps in order, each
/// under its own retry budget.
#[derive(Debug)]
pub struct Pipeline<A> {
    activities: A,
    policy: RetryPolicy,
    hours: TradingHours,
}

impl<A: Activities> Pipeline<A> {
    /// Creates a pipeline with the given gate and retry policy.
    pub const fn new(activities: A, policy: RetryPolicy, hours: TradingHours) -> Self {
        Self {
            activities,
            policy,
            hours,
        }
    }

    /// Runs the pipeline once at the current instant.
    ///
    /// # Errors
    ///
    /// Returns the exhausted step's final failure if any step runs out of
    /// retry budget.
    pub async fn run(&self, bypass_gate: bool) -> Result<RunOutcome, PipelineError> {
        self.run_at(Utc::now(), bypass_gate).await
    }

    /// Runs the pipeline once, reading the gate at the given instant.
    ///
    /// The gate is checked exactly once, before the scrape step. When it
    /// is closed and not bypassed, the run skips without touching the
    /// network or the store.
    ///
    /// # Errors
    ///
    /// Returns the exhausted step's final failure if any step runs out of
    /// retry budget.
    pub async fn run_at(
        &self,
        now: DateTime<Utc>,
        bypass_gate: bool,
    ) -> Result<RunOutcome, PipelineError> {
        if !bypass_gate && !self.hours.is_open(now) {
            return Ok(RunOutcome::Skipped);
        }

        let raw = self
            .run_step(Step::Scrape, || self.activities.scrape())
            .await?;

        let validated = self
            .run_step(Step::Validate, || self.activities.validate(raw.clone()))
            .await?;

        self.run_step(Step::Insert, || self.activities.insert(&validated))
            .await?;

        Ok(RunOutcome::Completed {
            records: validated.len(),
        })
    }

    /// Runs one step under the retry policy. Each attempt gets the full
    /// per-attempt timeout; a timed-out attempt counts against the budget
    /// like any other failure.
    async fn run_step<T, F, Fut>(&self, step: Step, operation: F) -> Result<T, PipelineError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, PipelineError>>,
    {
        let mut attempt = 1;
        loop {
            let outcome =
                match tokio::time::timeout(self.policy.attempt_timeout, operation()).await {
                    Ok(result) => result,
                    Err(_) => Err(PipelineError::StepTimeout {
                        step,
                        timeout: self.policy.attempt_timeout,
                    }),
                };

            let failure = match outcome {
                Ok(value) => return Ok(value),
                Err(failure) => failure,
            };

            if attempt >= self.policy.max_attempts {
                return Err(PipelineError::RetriesExhausted {
                    step,
                    attempts: attempt,
                    source: Box::new(failure),
                });
            }
            tokio::time::sleep(self.policy.backoff_for(attempt)).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use motijheel_scrape::ScrapeError;
    use motijheel_store::StoreError;
    use motijheel_types::{Observation, RawObservation, TimeField};
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Instant inside Dhaka trading hours (11:00 local, Monday).
    fn open_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 3, 5, 0, 0).unwrap()
    }

    /// Instant outside Dhaka trading hours (07:00 local, Monday).
    fn closed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 3, 1, 0, 0).unwrap()
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1),
            backoff_factor: 2.0,
            max_backoff: Duration::from_millis(4),
            attempt_timeout: Duration::from_secs(5),
        }
    }

    fn raw_record(code: &str) -> RawObservation {
        RawObservation {
            time: TimeField::Instant(open_instant()),
            source: "dse_bd".to_string(),
            metric_name: code.to_string(),
            value: 10.5,
            metadata: BTreeMap::new(),
        }
    }

    fn valid_record(code: &str) -> Observation {
        Observation {
            time: open_instant(),
            source: "dse_bd".to_string(),
            metric_name: code.to_string(),
            value: 10.5,
            metadata: BTreeMap::new(),
        }
    }

    /// Scripted activities: per-step call counters and per-step failure
    /// counts to inject before succeeding.
    #[derive(Debug, Default)]
    struct ScriptedActivities {
        scrape_calls: Mutex<u32>,
        validate_calls: Mutex<u32>,
        insert_calls: Mutex<u32>,
        scrape_failures: u32,
        validate_fails: bool,
        insert_failures: u32,
    }

    #[async_trait]
    impl Activities for ScriptedActivities {
        async fn scrape(&self) -> Result<Vec<RawObservation>, PipelineError> {
            let mut calls = self.scrape_calls.lock().unwrap();
            *calls += 1;
            if *calls <= self.scrape_failures {
                return Err(ScrapeError::TableMissing.into());
            }
            Ok(vec![raw_record("ABC"), raw_record("XYZ")])
        }

        async fn validate(
            &self,
            batch: Vec<RawObservation>,
        ) -> Result<Vec<Observation>, PipelineError> {
            *self.validate_calls.lock().unwrap() += 1;
            if self.validate_fails {
                return Err(motijheel_validate::validate_batch(vec![RawObservation {
                    metric_name: String::new(),
                    ..raw_record("")
                }])
                .unwrap_err()
                .into());
            }
            Ok(batch
                .iter()
                .map(|r| valid_record(&r.metric_name))
                .collect())
        }

        async fn insert(&self, _batch: &[Observation]) -> Result<(), PipelineError> {
            let mut calls = self.insert_calls.lock().unwrap();
            *calls += 1;
            if *calls <= self.insert_failures {
                return Err(StoreError::from(sqlx::Error::PoolTimedOut).into());
            }
            Ok(())
        }
    }

    fn pipeline(activities: ScriptedActivities) -> Pipeline<ScriptedActivities> {
        Pipeline::new(activities, fast_policy(), TradingHours::default())
    }

    #[tokio::test]
    async fn test_closed_gate_skips_without_side_effects() {
        let p = pipeline(ScriptedActivities::default());
        let outcome = p.run_at(closed_instant(), false).await.unwrap();
        assert_eq!(outcome, RunOutcome::Skipped);
        assert_eq!(*p.activities.scrape_calls.lock().unwrap(), 0);
        assert_eq!(*p.activities.insert_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bypass_runs_outside_hours() {
        let p = pipeline(ScriptedActivities::default());
        let outcome = p.run_at(closed_instant(), true).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed { records: 2 });
    }

    #[tokio::test]
    async fn test_transient_scrape_failure_is_retried() {
        let p = pipeline(ScriptedActivities {
            scrape_failures: 2,
            ..Default::default()
        });
        let outcome = p.run_at(open_instant(), false).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed { records: 2 });
        assert_eq!(*p.activities.scrape_calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_scrape_budget_exhaustion() {
        let p = pipeline(ScriptedActivities {
            scrape_failures: 5,
            ..Default::default()
        });
        let error = p.run_at(open_instant(), false).await.unwrap_err();
        match error {
            PipelineError::RetriesExhausted { step, attempts, .. } => {
                assert_eq!(step, Step::Scrape);
                assert_eq!(attempts, 3);
            }
            other => panic!("expected retries exhausted, got {other}"),
        }
        // Only the budgeted attempts were made and nothing was written.
        assert_eq!(*p.activities.scrape_calls.lock().unwrap(), 3);
        assert_eq!(*p.activities.insert_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transient_insert_failure_does_not_rerun_scrape() {
        let p = pipeline(ScriptedActivities {
            insert_failures: 2,
            ..Default::default()
        });
        let outcome = p.run_at(open_instant(), false).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed { records: 2 });
        // Only the failing step is retried; the earlier steps ran once.
        assert_eq!(*p.activities.scrape_calls.lock().unwrap(), 1);
        assert_eq!(*p.activities.validate_calls.lock().unwrap(), 1);
        assert_eq!(*p.activities.insert_calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_insert_exhaustion_leaves_earlier_steps_at_one_call() {
        let p = pipeline(ScriptedActivities {
            insert_failures: 5,
            ..Default::default()
        });
        let error = p.run_at(open_instant(), false).await.unwrap_err();
        match error {
            PipelineError::RetriesExhausted { step, attempts, .. } => {
                assert_eq!(step, Step::Insert);
                assert_eq!(attempts, 3);
            }
            other => panic!("expected retries exhausted, got {other}"),
        }
        assert_eq!(*p.activities.scrape_calls.lock().unwrap(), 1);
        assert_eq!(*p.activities.validate_calls.lock().unwrap(), 1);
        assert_eq!(*p.activities.insert_calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_validation_failure_never_reaches_insert() {
        let p = pipeline(ScriptedActivities {
            validate_fails: true,
            ..Default::default()
        });
        let error = p.run_at(open_instant(), false).await.unwrap_err();
        match error {
            PipelineError::RetriesExhausted { step, .. } => assert_eq!(step, Step::Validate),
            other => panic!("expected retries exhausted, got {other}"),
        }
        assert_eq!(*p.activities.insert_calls.lock().unwrap(), 0);
    }

    /// Activities whose scrape never resolves, for timeout classification.
    #[derive(Debug)]
    struct StalledActivities;

    #[async_trait]
    impl Activities for StalledActivities {
        async fn scrape(&self) -> Result<Vec<RawObservation>, PipelineError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }

        async fn validate(
            &self,
            _batch: Vec<RawObservation>,
        ) -> Result<Vec<Observation>, PipelineError> {
            Ok(Vec::new())
        }

        async fn insert(&self, _batch: &[Observation]) -> Result<(), PipelineError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_stalled_attempt_times_out_and_counts() {
        let policy = RetryPolicy {
            max_attempts: 2,
            initial_backoff: Duration::from_millis(1),
            backoff_factor: 2.0,
            max_backoff: Duration::from_millis(2),
            attempt_timeout: Duration::from_millis(20),
        };
        let p = Pipeline::new(StalledActivities, policy, TradingHours::default());
        let error = p.run_at(open_instant(), false).await.unwrap_err();
        match error {
            PipelineError::RetriesExhausted {
                step,
                attempts,
                source,
            } => {
                assert_eq!(step, Step::Scrape);
                assert_eq!(attempts, 2);
                assert!(matches!(*source, PipelineError::StepTimeout { .. }));
            }
            other => panic!("expected retries exhausted, got {other}"),
        }
    }
}
