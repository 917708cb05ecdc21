//! Bounded-concurrency account synchronization.

use crate::config::SyncConfig;
use crate::detector::RankChangeDetector;
use crate::display::apply_rating_tag;
use chrono::Utc;
use ladder_core::{Account, AccountId, GuildSettings, RatingFacts, RatingSample, User, render_nickname};
use ladder_error::LadderResult;
use ladder_interface::{
    IconRef, MemberDisplay, NotificationSink, RemoteDirectory, Store, StoreTransaction,
    WarningKind,
};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error, instrument, warn};

/// How many recent samples feed the stale-rating nickname fallback.
const FALLBACK_HISTORY: usize = 10;

/// Counts from one pipeline invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Accounts synced to a committed sample
    pub completed: usize,
    /// Accounts whose sync failed and was logged
    pub failed: usize,
}

/// Fans a batch of account ids out over a bounded worker pool.
///
/// Each id is processed exactly once by exactly one worker; per-account
/// failures are isolated, committed per account, and never cancel sibling
/// workers. Workers pace themselves with a uniform random delay to stay
/// under the remote directory's rate limits.
pub struct RateSyncPipeline<S, D, M, N> {
    store: Arc<S>,
    directory: Arc<D>,
    display: Arc<M>,
    sink: Arc<N>,
    settings: Arc<GuildSettings>,
    detector: RankChangeDetector<N>,
    max_workers: usize,
    jitter_max: Duration,
}

impl<S, D, M, N> Clone for RateSyncPipeline<S, D, M, N>
where
    N: NotificationSink,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            directory: self.directory.clone(),
            display: self.display.clone(),
            sink: self.sink.clone(),
            settings: self.settings.clone(),
            detector: RankChangeDetector::new(self.sink.clone()),
            max_workers: self.max_workers,
            jitter_max: self.jitter_max,
        }
    }
}

impl<S, D, M, N> RateSyncPipeline<S, D, M, N>
where
    S: Store + 'static,
    D: RemoteDirectory + 'static,
    M: MemberDisplay + 'static,
    N: NotificationSink + 'static,
{
    /// Create a pipeline over the given collaborators.
    pub fn new(
        store: Arc<S>,
        directory: Arc<D>,
        display: Arc<M>,
        sink: Arc<N>,
        settings: Arc<GuildSettings>,
        config: &SyncConfig,
    ) -> Self {
        Self {
            store,
            directory,
            display,
            sink: sink.clone(),
            settings,
            detector: RankChangeDetector::new(sink),
            max_workers: config.max_workers,
            jitter_max: config.jitter_max(),
        }
    }

    /// Sync every account in `ids` exactly once.
    ///
    /// Spawns `min(ids.len(), max_workers)` workers draining a closed queue
    /// and joins them all before returning; a failing account is logged and
    /// counted, never fatal to the batch.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn sync_accounts(&self, ids: Vec<AccountId>) -> SyncOutcome {
        if ids.is_empty() {
            debug!("nothing to sync");
            return SyncOutcome::default();
        }

        let worker_count = ids.len().min(self.max_workers.max(1));
        let (tx, rx) = mpsc::channel(ids.len());
        for id in ids {
            // Capacity equals the input length, so this never blocks.
            let _ = tx.send(id).await;
        }
        drop(tx);

        let rx = Arc::new(Mutex::new(rx));
        let mut workers = JoinSet::new();
        for worker in 0..worker_count {
            let this = self.clone();
            let rx = rx.clone();
            workers.spawn(async move { this.drain_queue(worker, rx).await });
        }

        let mut outcome = SyncOutcome::default();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(worker_outcome) => {
                    outcome.completed += worker_outcome.completed;
                    outcome.failed += worker_outcome.failed;
                }
                Err(e) => error!(error = %e, "sync worker panicked"),
            }
        }
        debug!(?outcome, "done syncing");
        outcome
    }

    /// Worker loop: dequeue ids until the queue is drained and closed.
    ///
    /// The first dequeued id is processed immediately; every subsequent one
    /// waits out a uniform random jitter first.
    async fn drain_queue(
        &self,
        worker: usize,
        rx: Arc<Mutex<mpsc::Receiver<AccountId>>>,
    ) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();
        let mut first = true;
        loop {
            let Some(id) = rx.lock().await.recv().await else {
                break;
            };
            if first {
                first = false;
            } else {
                let jitter = {
                    let mut rng = rand::thread_rng();
                    self.jitter_max.mul_f64(rng.r#gen::<f64>())
                };
                debug!(worker, ?jitter, "pacing before next lookup");
                tokio::time::sleep(jitter).await;
            }
            match self.sync_one(id).await {
                Ok(()) => outcome.completed += 1,
                Err(e) => {
                    error!(account = %id, error = %e, "account sync failed");
                    outcome.failed += 1;
                }
            }
        }
        debug!(worker, "queue drained, worker exiting");
        outcome
    }

    /// Sync a single account inside its own transaction.
    async fn sync_one(&self, id: AccountId) -> LadderResult<()> {
        let mut txn = self.store.begin().await?;
        let Some(mut account) = txn.load_account(id).await? else {
            warn!(account = %id, "account not found, probably deleted");
            txn.commit().await?;
            return Ok(());
        };

        match self.directory.fetch(&account.tag).await {
            Ok(lookup) => {
                let sample = txn.append_rating_sample(id, Some(lookup.rating)).await?;
                txn.set_error_count(id, 0).await?;
                account.record_rating(Some(lookup.rating), sample.timestamp);
                self.after_sample(&mut txn, &account, &sample, Some(&lookup.rank_icon))
                    .await?;
                txn.commit().await?;
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                debug!(tag = %account.tag, "no rating in directory, oh well");
                let sample = txn.append_rating_sample(id, None).await?;
                txn.set_error_count(id, 0).await?;
                account.record_rating(None, sample.timestamp);
                self.after_sample(&mut txn, &account, &sample, None).await?;
                txn.commit().await?;
                Ok(())
            }
            Err(e) => {
                // Still append a sample carrying the previous value so
                // last_update advances and the account is not retried on
                // every tick.
                txn.append_rating_sample(id, account.rating).await?;
                txn.set_error_count(id, account.error_count + 1).await?;
                txn.commit().await?;
                Err(e.into())
            }
        }
    }

    /// Post-sample work: refresh the display name, then check for promotion.
    async fn after_sample(
        &self,
        txn: &mut S::Txn,
        account: &Account,
        sample: &RatingSample,
        icon: Option<&IconRef>,
    ) -> LadderResult<()> {
        let Some(mut user) = txn.load_user(account.user_id).await? else {
            warn!(user = %account.user_id, "owning user not found, skipping follow-up");
            return Ok(());
        };
        // The loaded user still carries the pre-sync account row.
        for owned in &mut user.accounts {
            if owned.id == account.id {
                *owned = account.clone();
            }
        }

        // The appended sample must still reach the commit when the display
        // pass fails, or the account stays due and re-fails every sweep.
        if let Err(e) = self.refresh_display(txn, &user).await {
            warn!(user = %user.id, error = %e, "nickname refresh failed");
        }

        if let Some(icon) = icon {
            self.detector.evaluate(txn, &user, sample, icon).await?;
        }
        Ok(())
    }

    /// Best-effort nickname refresh across the user's guilds.
    ///
    /// Hierarchy refusals are suppressed; an over-long result warns the user
    /// at most once per week.
    async fn refresh_display(&self, txn: &mut S::Txn, user: &User) -> LadderResult<()> {
        let recent = match user.primary() {
            Some(primary) => txn.recent_samples(primary.id, FALLBACK_HISTORY).await?,
            None => Vec::new(),
        };
        let facts = RatingFacts::for_user(user, &recent);
        let formatted = render_nickname(&facts, &user.format)?;

        let states = match self.display.member_states(user.id).await {
            Ok(states) => states,
            Err(e) => {
                warn!(user = %user.id, error = %e, "cannot observe member states");
                return Ok(());
            }
        };

        let mut too_long = None;
        for state in states {
            let Some(config) = self.settings.get(state.guild) else {
                continue;
            };
            let show = config.show_rating_for(user, &state.voice);
            match apply_rating_tag(&state.nickname, &formatted, show) {
                Ok(new_nick) if new_nick != state.nickname => {
                    match self
                        .display
                        .set_nickname(state.guild, user.id, &new_nick)
                        .await
                    {
                        Ok(()) => {}
                        Err(e) if e.is_hierarchy() => {
                            debug!(
                                user = %user.id,
                                guild = %state.guild,
                                "not enough permissions to update nick"
                            );
                        }
                        Err(e) => {
                            warn!(user = %user.id, guild = %state.guild, error = %e, "error while setting nick");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => too_long = Some(e),
            }
        }

        if let Some(e) = too_long {
            let now = Utc::now();
            if user.may_warn_about_nickname(now) {
                txn.set_nickname_warning(user.id, now).await?;
                self.sink
                    .warn(user.id, WarningKind::NicknameTooLong, &e.kind.to_string())
                    .await;
            }
        }
        Ok(())
    }
}
