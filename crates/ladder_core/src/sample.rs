//! Rating history samples.

use crate::{AccountId, Rank, SampleId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point in an account's rating history.
///
/// Samples are append-only and immutable once created. A new sample is
/// written on every sync attempt, even when the fetched value matches the
/// previous one, so `last_update` keeps advancing and staleness checks stay
/// accurate. The rank is derived from the value at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSample {
    /// Store-assigned sample id
    pub id: SampleId,
    /// The account this sample belongs to
    pub account_id: AccountId,
    /// When the sample was recorded
    pub timestamp: DateTime<Utc>,
    /// The fetched rating, absent when the directory had no entry
    pub value: Option<i32>,
    /// Rank bucket for the value, absent when the value is
    pub rank: Option<Rank>,
}

impl RatingSample {
    /// Create a sample, deriving the rank from the value.
    pub fn new(
        id: SampleId,
        account_id: AccountId,
        timestamp: DateTime<Utc>,
        value: Option<i32>,
    ) -> Self {
        Self {
            id,
            account_id,
            timestamp,
            value,
            rank: value.map(Rank::for_rating),
        }
    }
}
