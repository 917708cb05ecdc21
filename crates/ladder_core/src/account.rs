//! Tracked external accounts.

use crate::{AccountId, Rank, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An external-service identity with a tracked rating history.
///
/// Every account belongs to exactly one [`User`](crate::User) and holds an
/// ordered position among that user's accounts; position `0` is the primary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned account id
    pub id: AccountId,
    /// Owning user
    pub user_id: UserId,
    /// Human-readable directory handle, e.g. `"Player#1234"`
    pub tag: String,
    /// Stable id of the identity on the external service
    pub external_id: String,
    /// Position within the owning user's account list; 0 is primary
    pub position: u32,
    /// Most recent rating, absent when the directory has no entry
    pub rating: Option<i32>,
    /// Rank bucket for the most recent rating
    pub rank: Option<Rank>,
    /// Consecutive transient sync failures since the last success
    pub error_count: u32,
    /// When the rating history last advanced
    pub last_update: DateTime<Utc>,
}

impl Account {
    /// Record a freshly synced rating value.
    ///
    /// Advances `last_update` unconditionally, matching the append-only
    /// history: a sync attempt always produces a sample.
    pub fn record_rating(&mut self, value: Option<i32>, now: DateTime<Utc>) {
        self.rating = value;
        self.rank = value.map(Rank::for_rating);
        self.last_update = now;
    }

    /// True when this is the user's primary account.
    pub fn is_primary(&self) -> bool {
        self.position == 0
    }
}
