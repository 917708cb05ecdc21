//! Scheduler sweeps and the watermarked daily task.


use chrono::{Duration, Utc};
use ladder_core::{AccountId, GuildSettings};
use ladder_error::{LadderResult, StoreError, StoreErrorKind};
use ladder_interface::{Store, StoreTransaction};
use ladder_sync::{HIGHSCORE_JOB, RateSyncPipeline, Scheduler, SyncConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use sync_test_helpers::{
    Lookup, MemStore, RecordingDisplay, RecordingSink, ScriptedDirectory, seed_user,
};

fn scheduler(
    store: &MemStore,
    directory: &Arc<ScriptedDirectory>,
    config: SyncConfig,
) -> Scheduler<MemStore, ScriptedDirectory, RecordingDisplay, RecordingSink> {
    let store = Arc::new(store.clone());
    let pipeline = RateSyncPipeline::new(
        store.clone(),
        directory.clone(),
        Arc::new(RecordingDisplay::new()),
        Arc::new(RecordingSink::new()),
        Arc::new(GuildSettings::new()),
        &config,
    );
    Scheduler::new(store, Arc::new(pipeline), config)
}

#[tokio::test(start_paused = true)]
async fn test_sweep_syncs_only_stale_accounts() {
    let store = MemStore::new();
    let directory = Arc::new(ScriptedDirectory::new());
    seed_user(&store, 1, 1, "Stale#1", Some(2000));
    seed_user(&store, 2, 2, "Fresh#2", Some(2000));
    store.set_last_update(AccountId(1), Utc::now() - Duration::hours(2));
    directory.script("Stale#1", vec![Lookup::Rating(2100)]);

    let sched = scheduler(&store, &directory, SyncConfig::default());
    let due = sched.sweep_once().await.unwrap();

    assert_eq!(due, 1);
    assert_eq!(directory.fetch_count("Stale#1"), 1);
    assert_eq!(directory.fetch_count("Fresh#2"), 0);

    // Immediately afterwards nothing is stale anymore.
    assert_eq!(sched.sweep_once().await.unwrap(), 0);
}

fn counting_task(count: Arc<AtomicUsize>) -> impl Fn() -> futures::future::Ready<LadderResult<()>> {
    move || {
        count.fetch_add(1, Ordering::SeqCst);
        futures::future::ready(Ok(()))
    }
}

async fn preset_watermark(store: &MemStore, at: chrono::DateTime<Utc>) {
    let mut txn = store.begin().await.unwrap();
    txn.set_watermark(HIGHSCORE_JOB, at).await.unwrap();
    txn.commit().await.unwrap();
}

#[tokio::test]
async fn test_daily_task_runs_once_and_persists_watermark() {
    let store = MemStore::new();
    let directory = Arc::new(ScriptedDirectory::new());
    // Trigger hour 0 is always in the past today; yesterday's watermark
    // makes the run due.
    let mut config = SyncConfig::default();
    config.daily_hour = 0;
    preset_watermark(&store, Utc::now() - Duration::days(1)).await;

    let sched = scheduler(&store, &directory, config);
    let runs = Arc::new(AtomicUsize::new(0));
    let task = counting_task(runs.clone());

    assert!(sched.daily_tick(&task).await.unwrap());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    let persisted = store.watermark(HIGHSCORE_JOB).unwrap();
    assert!(persisted > Utc::now() - Duration::minutes(1));

    // The watermark now sits past today's trigger, so no second run.
    assert!(!sched.daily_tick(&task).await.unwrap());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_daily_task_is_retried_next_tick() {
    let store = MemStore::new();
    let directory = Arc::new(ScriptedDirectory::new());
    let mut config = SyncConfig::default();
    config.daily_hour = 0;
    let yesterday = Utc::now() - Duration::days(1);
    preset_watermark(&store, yesterday).await;

    let sched = scheduler(&store, &directory, config);
    let failing = || async {
        Err::<(), _>(StoreError::new(StoreErrorKind::Backend("boom".to_string())).into())
    };

    assert!(sched.daily_tick(&failing).await.is_err());
    // The watermark was not advanced past the failed run.
    assert_eq!(store.watermark(HIGHSCORE_JOB), Some(yesterday));

    let runs = Arc::new(AtomicUsize::new(0));
    let task = counting_task(runs.clone());
    assert!(sched.daily_tick(&task).await.unwrap());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_first_boot_creates_watermark_without_running() {
    let store = MemStore::new();
    let directory = Arc::new(ScriptedDirectory::new());
    let mut config = SyncConfig::default();
    config.daily_hour = 0;

    let sched = scheduler(&store, &directory, config);
    let runs = Arc::new(AtomicUsize::new(0));
    let task = counting_task(runs.clone());

    // No watermark yet: one is created at now, which suppresses today.
    assert!(!sched.daily_tick(&task).await.unwrap());
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    let created = store.watermark(HIGHSCORE_JOB).unwrap();
    assert!(created > Utc::now() - Duration::minutes(1));
}
