//! Trait definitions for the engine's external collaborators.

use crate::{GuildMemberState, RatingLookup, WarningKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ladder_core::{
    Account, AccountId, ChannelId, GuildId, Rank, RatingSample, SampleId, SyncWatermark, User,
    UserId, VoiceChannel,
};
use ladder_error::{ChannelError, DirectoryError, MemberError, StoreError};

/// The remote rating directory.
///
/// Lookups may fail transiently (unreachable, rate-limited) or report that
/// the tag has no entry; the sync pipeline treats the latter as an absent
/// rating, not an error.
#[async_trait]
pub trait RemoteDirectory: Send + Sync {
    /// Fetch the current rating and rank icon for a tag.
    async fn fetch(&self, tag: &str) -> Result<RatingLookup, DirectoryError>;
}

/// The transactional record store.
///
/// All reads and writes happen inside a transaction obtained from
/// [`Store::begin`]; mutations become durable only on
/// [`StoreTransaction::commit`].
#[async_trait]
pub trait Store: Send + Sync {
    /// The transaction handle type.
    type Txn: StoreTransaction;

    /// Open a transaction.
    async fn begin(&self) -> Result<Self::Txn, StoreError>;
}

/// One open store transaction.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Ids of accounts whose history last advanced before `older_than`.
    async fn accounts_due_for_sync(
        &mut self,
        older_than: DateTime<Utc>,
    ) -> Result<Vec<AccountId>, StoreError>;

    /// Load an account, or `None` when it was deleted meanwhile.
    async fn load_account(&mut self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Load a user with their ordered accounts.
    async fn load_user(&mut self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Append a rating sample and advance the account's `last_update`.
    ///
    /// Always appends, even when the value matches the previous sample, so
    /// staleness checks remain accurate.
    async fn append_rating_sample(
        &mut self,
        account: AccountId,
        value: Option<i32>,
    ) -> Result<RatingSample, StoreError>;

    /// The account's most recent samples, newest first.
    async fn recent_samples(
        &mut self,
        account: AccountId,
        limit: usize,
    ) -> Result<Vec<RatingSample>, StoreError>;

    /// Overwrite the account's consecutive-failure counter.
    async fn set_error_count(&mut self, account: AccountId, count: u32) -> Result<(), StoreError>;

    /// The best prior sample for a promotion check.
    ///
    /// Among the account's samples carrying a value, excluding `exclude`:
    /// the maximum value, tie-broken by latest timestamp, then by lowest
    /// sample id. `None` when no prior sample carries a value.
    async fn best_prior_sample(
        &mut self,
        account: AccountId,
        exclude: SampleId,
    ) -> Result<Option<RatingSample>, StoreError>;

    /// Raise a user's highest-rank watermark.
    async fn set_highest_rank(&mut self, user: UserId, rank: Rank) -> Result<(), StoreError>;

    /// Record when the user was last warned about an over-long nickname.
    async fn set_nickname_warning(
        &mut self,
        user: UserId,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Read a job watermark, creating it with `last_run = now` when absent.
    ///
    /// Defaulting to now suppresses an immediate run on first boot.
    async fn get_or_create_watermark(&mut self, job: &str) -> Result<SyncWatermark, StoreError>;

    /// Persist a job watermark.
    async fn set_watermark(&mut self, job: &str, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Min and max rating among the given users, `None` when none is rated.
    async fn min_max_rating(
        &mut self,
        users: &[UserId],
    ) -> Result<Option<(i32, i32)>, StoreError>;

    /// Commit the transaction.
    async fn commit(self) -> Result<(), StoreError>;
}

/// The remote voice-channel service.
///
/// Create and delete are asynchronous on the remote side; completion is
/// correlated through the reconciler's confirmation router, not through
/// these calls returning.
#[async_trait]
pub trait RemoteChannelService: Send + Sync {
    /// List the voice channels under a parent category.
    async fn list_channels(&self, parent: ChannelId) -> Result<Vec<VoiceChannel>, ChannelError>;

    /// Issue creation of a voice channel under a parent.
    async fn create_channel(
        &self,
        parent: ChannelId,
        name: &str,
        member_limit: u32,
    ) -> Result<(), ChannelError>;

    /// Issue deletion of a voice channel.
    async fn delete_channel(&self, id: ChannelId) -> Result<(), ChannelError>;

    /// Rename a voice channel.
    async fn rename_channel(&self, id: ChannelId, name: &str) -> Result<(), ChannelError>;

    /// Update a voice channel's member limit.
    async fn set_member_limit(&self, id: ChannelId, limit: u32) -> Result<(), ChannelError>;

    /// Move a voice channel to a position within its parent.
    async fn move_channel(&self, id: ChannelId, position: u32) -> Result<(), ChannelError>;
}

/// Member display updates on the chat service.
#[async_trait]
pub trait MemberDisplay: Send + Sync {
    /// The user's observable state in every guild both sides share.
    async fn member_states(&self, user: UserId) -> Result<Vec<GuildMemberState>, MemberError>;

    /// Set the user's nickname in one guild.
    async fn set_nickname(
        &self,
        guild: GuildId,
        user: UserId,
        nick: &str,
    ) -> Result<(), MemberError>;
}

/// Delivery of congratulation and warning messages.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Announce that a user advanced to a new rank.
    async fn promote(&self, user: UserId, rank: Rank, icon: &crate::IconRef);

    /// Warn a user about a policy problem, e.g. an over-long nickname.
    async fn warn(&self, user: UserId, kind: WarningKind, detail: &str);
}
