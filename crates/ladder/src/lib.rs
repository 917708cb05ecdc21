//! Ladder - Synchronization & Reconciliation Engine
//!
//! Ladder keeps two pieces of externally-visible state consistent with
//! ground truth despite a rate-limited, eventually-consistent remote API and
//! partial failures: a user's tracked skill rating, and a guild's
//! voice-channel topology.
//!
//! # Architecture
//!
//! Ladder is organized as a workspace with focused crates:
//!
//! - `ladder_core` - Data model: ranks, rating samples, accounts, users,
//!   guild configuration, and the pure nickname formatter
//! - `ladder_error` - Error types
//! - `ladder_interface` - Trait seams for the external collaborators:
//!   rating directory, record store, channel service, member display, and
//!   notification sink
//! - `ladder_sync` - The bounded-concurrency sync pipeline, rank-change
//!   detection, and the periodic scheduler
//! - `ladder_voice` - The voice-channel reconciler with correlated
//!   confirmation of remote mutations
//!
//! This crate (`ladder`) re-exports everything for convenience.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ladder::{RateSyncPipeline, Scheduler, SyncConfig, GuildSettings};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SyncConfig::default();
//!     let settings = Arc::new(GuildSettings::new());
//!     let pipeline = Arc::new(RateSyncPipeline::new(
//!         store, directory, display, sink, settings, &config,
//!     ));
//!     let scheduler = Scheduler::new(store, pipeline, config);
//!     tokio::join!(
//!         scheduler.run_sweep_loop(),
//!         scheduler.run_daily_loop(|| async { Ok(()) }),
//!     );
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use ladder_core::{
    Account, AccountId, ChannelId, GuildConfig, GuildId, GuildSettings, GuildVoiceCategory,
    MAX_NICKNAME_LEN, Presence, PrefixRule, Rank, RatingFacts, RatingSample, SampleId,
    SyncWatermark, User, UserId, VoiceChannel, VoiceState, render_nickname,
};
pub use ladder_error::{
    ChannelError, ChannelErrorKind, ConfigError, ConfigErrorKind, DirectoryError,
    DirectoryErrorKind, FormatError, FormatErrorKind, LadderError, LadderErrorKind, LadderResult,
    MemberError, MemberErrorKind, StoreError, StoreErrorKind,
};
pub use ladder_interface::{
    GuildMemberState, IconRef, MemberDisplay, NotificationSink, RatingLookup,
    RemoteChannelService, RemoteDirectory, Store, StoreTransaction, WarningKind,
};
pub use ladder_sync::{
    DailySchedule, HIGHSCORE_JOB, RankChangeDetector, RateSyncPipeline, Scheduler, SyncConfig,
    SyncOutcome, apply_rating_tag,
};
pub use ladder_voice::{
    ChannelReconciler, ConfirmationKey, ConfirmationRouter, PassReport, ReconcileOptions,
    base_name, channel_name, rating_suffix, split_managed,
};
