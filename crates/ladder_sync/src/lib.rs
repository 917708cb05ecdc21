//! Rating synchronization for the Ladder engine.
//!
//! Three pieces keep tracked ratings consistent with the remote directory:
//! the [`RateSyncPipeline`] fans a batch of accounts out over a bounded
//! worker pool, the [`RankChangeDetector`] decides whether a sync crossed
//! into a new rank, and the [`Scheduler`] drives periodic sweeps plus the
//! watermarked once-daily task.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod detector;
mod display;
mod pipeline;
mod scheduler;

pub use config::SyncConfig;
pub use detector::RankChangeDetector;
pub use display::apply_rating_tag;
pub use pipeline::{RateSyncPipeline, SyncOutcome};
pub use scheduler::{DailySchedule, HIGHSCORE_JOB, Scheduler};
