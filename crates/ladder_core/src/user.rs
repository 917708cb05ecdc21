//! Users and their ordered account sets.

use crate::{Account, Rank, UserId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a nickname-too-long warning stays suppressed after being sent.
const NICKNAME_WARNING_INTERVAL_DAYS: i64 = 7;

/// A chat-service member owning an ordered sequence of tracked accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Chat-service member id
    pub id: UserId,
    /// Accounts ordered by position; index 0 is the primary
    pub accounts: Vec<Account>,
    /// Best rank ever reached across all accounts; never lowered
    pub highest_rank: Option<Rank>,
    /// Show the rating tag in the nickname regardless of guild defaults
    pub always_show_rating: bool,
    /// Nickname format string with `$placeholder` substitutions
    pub format: String,
    /// When the user was last warned about an over-long nickname
    pub last_nickname_warning: Option<DateTime<Utc>>,
}

impl User {
    /// The primary account, if any account is registered.
    pub fn primary(&self) -> Option<&Account> {
        self.accounts.first()
    }

    /// The secondary account (position 1), if present.
    pub fn secondary(&self) -> Option<&Account> {
        self.accounts.get(1)
    }

    /// Restore the position invariant after the account set changed.
    ///
    /// The current primary keeps position 0; the remaining accounts are
    /// stably sorted by tag and assigned a contiguous ascending sequence.
    pub fn reposition_accounts(&mut self) {
        self.accounts.sort_by_key(|a| a.position);
        if let Some((primary, rest)) = self.accounts.split_first_mut() {
            primary.position = 0;
            rest.sort_by(|a, b| a.tag.cmp(&b.tag));
            for (i, account) in rest.iter_mut().enumerate() {
                account.position = (i + 1) as u32;
            }
        }
    }

    /// Raise the highest-rank watermark. Returns true when it moved.
    ///
    /// The watermark is monotonic: a later drop in rating never lowers it,
    /// which keeps promotion notifications exactly-once per crossing.
    pub fn raise_highest_rank(&mut self, rank: Rank) -> bool {
        match self.highest_rank {
            Some(current) if current >= rank => false,
            _ => {
                self.highest_rank = Some(rank);
                true
            }
        }
    }

    /// Whether an over-long-nickname warning may be sent now.
    ///
    /// Warnings are limited to one per week to avoid spamming the user.
    pub fn may_warn_about_nickname(&self, now: DateTime<Utc>) -> bool {
        match self.last_nickname_warning {
            None => true,
            Some(last) => last < now - Duration::days(NICKNAME_WARNING_INTERVAL_DAYS),
        }
    }
}
