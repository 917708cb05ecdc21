//! Persisted watermarks for crash-safe periodic jobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The last successful run of a named periodic job.
///
/// The scheduler reads the watermark before running a daily task and writes
/// it back immediately after, so a restarted process never skips a day and a
/// crash between run and persist costs at most one extra run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncWatermark {
    /// Job name, e.g. `"highscore"`
    pub job: String,
    /// When the job last ran to completion
    pub last_run: DateTime<Utc>,
}

impl SyncWatermark {
    /// Create a watermark for a job.
    pub fn new(job: impl Into<String>, last_run: DateTime<Utc>) -> Self {
        Self {
            job: job.into(),
            last_run,
        }
    }
}
