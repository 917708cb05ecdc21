//! Periodic sweeps and the watermarked daily task.

use crate::config::SyncConfig;
use crate::pipeline::RateSyncPipeline;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use ladder_error::LadderResult;
use ladder_interface::{MemberDisplay, NotificationSink, RemoteDirectory, Store, StoreTransaction};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Watermark job name for the daily highscore task.
pub const HIGHSCORE_JOB: &str = "highscore";

/// The once-per-day trigger decision.
///
/// A day's run becomes due at a fixed local hour; comparing the persisted
/// watermark against that instant makes the trigger idempotent across
/// restarts. A crash after running but before persisting costs at most one
/// extra run, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    hour: u32,
}

impl DailySchedule {
    /// Schedule a daily run at the given local hour.
    pub fn new(hour: u32) -> Self {
        Self { hour }
    }

    /// Whether the task is due at `now` given the last recorded run.
    pub fn is_due(&self, now: NaiveDateTime, last_run: NaiveDateTime) -> bool {
        let Some(next_run) = now.date().and_hms_opt(self.hour, 0, 0) else {
            return false;
        };
        now >= next_run && last_run < next_run
    }
}

fn as_local(ts: DateTime<Utc>) -> NaiveDateTime {
    ts.with_timezone(&Local).naive_local()
}

/// Drives the sweep loop and the daily loop.
///
/// The loops are independent: a repeated failure in one never stops the
/// other, and individual tick errors are logged, not propagated.
pub struct Scheduler<S, D, M, N> {
    store: Arc<S>,
    pipeline: Arc<RateSyncPipeline<S, D, M, N>>,
    config: SyncConfig,
    daily: DailySchedule,
}

impl<S, D, M, N> Scheduler<S, D, M, N>
where
    S: Store + 'static,
    D: RemoteDirectory + 'static,
    M: MemberDisplay + 'static,
    N: NotificationSink + 'static,
{
    /// Create a scheduler over a store and pipeline.
    pub fn new(store: Arc<S>, pipeline: Arc<RateSyncPipeline<S, D, M, N>>, config: SyncConfig) -> Self {
        let daily = DailySchedule::new(config.daily_hour);
        Self {
            store,
            pipeline,
            config,
            daily,
        }
    }

    /// Run the sweep loop forever.
    ///
    /// Every tick asks the store for stale accounts and hands them to the
    /// pipeline. Intended to be spawned; never returns.
    #[instrument(skip(self))]
    pub async fn run_sweep_loop(&self) {
        tokio::time::sleep(self.config.startup_grace()).await;
        debug!("sweep loop started");
        loop {
            if let Err(e) = self.sweep_once().await {
                error!(error = %e, "something went wrong during sweep");
            }
            tokio::time::sleep(self.config.sweep_interval()).await;
        }
    }

    /// One sweep tick: find stale accounts and sync them.
    ///
    /// Returns how many accounts were due.
    pub async fn sweep_once(&self) -> LadderResult<usize> {
        let cutoff = Utc::now() - self.config.stale_after();
        let mut txn = self.store.begin().await?;
        let due = txn.accounts_due_for_sync(cutoff).await?;
        txn.commit().await?;

        if due.is_empty() {
            debug!("no accounts need to be synced");
            return Ok(0);
        }
        info!(count = due.len(), "accounts need to be synced");
        let count = due.len();
        self.pipeline.sync_accounts(due).await;
        Ok(count)
    }

    /// Run the daily loop forever.
    ///
    /// Checks the watermark every sweep interval and runs `task` when the
    /// daily trigger is due. Intended to be spawned; never returns.
    #[instrument(skip(self, task))]
    pub async fn run_daily_loop<F, Fut>(&self, task: F)
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = LadderResult<()>> + Send,
    {
        loop {
            if let Err(e) = self.daily_tick(&task).await {
                error!(error = %e, "error during daily tick");
            }
            tokio::time::sleep(self.config.sweep_interval()).await;
        }
    }

    /// One daily tick. Returns true when the task ran.
    ///
    /// The watermark is read in one short transaction and persisted in a
    /// second one after the task completes; no transaction stays open
    /// across the task itself. A crash mid-run causes a rerun on the next
    /// tick rather than a skipped day.
    pub async fn daily_tick<F, Fut>(&self, task: &F) -> LadderResult<bool>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = LadderResult<()>> + Send,
    {
        let mut txn = self.store.begin().await?;
        let watermark = txn.get_or_create_watermark(HIGHSCORE_JOB).await?;
        txn.commit().await?;

        let now = Utc::now();
        if !self.daily.is_due(as_local(now), as_local(watermark.last_run)) {
            return Ok(false);
        }

        info!(job = HIGHSCORE_JOB, "running daily task");
        task().await?;

        let mut txn = self.store.begin().await?;
        txn.set_watermark(HIGHSCORE_JOB, now).await?;
        txn.commit().await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_not_due_before_trigger_hour() {
        let schedule = DailySchedule::new(9);
        assert!(!schedule.is_due(at(2, 8, 59), at(1, 9, 5)));
    }

    #[test]
    fn test_due_after_trigger_when_last_run_was_yesterday() {
        let schedule = DailySchedule::new(9);
        assert!(schedule.is_due(at(2, 9, 1), at(1, 9, 5)));
    }

    #[test]
    fn test_not_due_twice_same_day() {
        let schedule = DailySchedule::new(9);
        // Ran at 09:01, checked again at 10:00: last_run >= today's trigger.
        assert!(!schedule.is_due(at(2, 10, 0), at(2, 9, 1)));
    }

    #[test]
    fn test_crash_before_persist_reruns() {
        let schedule = DailySchedule::new(9);
        // The task ran at 09:01 but the watermark still shows yesterday.
        assert!(schedule.is_due(at(2, 9, 2), at(1, 9, 5)));
    }

    #[test]
    fn test_first_boot_waits_for_next_trigger() {
        let schedule = DailySchedule::new(9);
        // Watermark created with last_run = now at 10:00 suppresses today.
        assert!(!schedule.is_due(at(2, 10, 0), at(2, 10, 0)));
        // Next day it fires normally.
        assert!(schedule.is_due(at(3, 9, 0), at(2, 10, 0)));
    }
}
