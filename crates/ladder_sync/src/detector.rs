//! Promotion detection after a sync.

use ladder_core::{RatingSample, User};
use ladder_error::LadderResult;
use ladder_interface::{IconRef, NotificationSink, StoreTransaction};
use std::sync::Arc;
use tracing::{debug, info};

/// Decides whether a freshly written sample crossed into a new rank.
///
/// A promotion fires at most once per crossing: the comparison runs against
/// the best prior sample, and the user's monotonic `highest_rank` watermark
/// suppresses re-firing for any rank already reached.
pub struct RankChangeDetector<N> {
    sink: Arc<N>,
}

impl<N: NotificationSink> RankChangeDetector<N> {
    /// Create a detector delivering promotions to the given sink.
    pub fn new(sink: Arc<N>) -> Self {
        Self { sink }
    }

    /// Evaluate the just-written sample. Returns true when a promotion fired.
    ///
    /// The previous best is the maximum rating among the account's other
    /// valued samples, tie-broken by latest timestamp then lowest sample id;
    /// an absent rating never triggers a check.
    pub async fn evaluate<T: StoreTransaction>(
        &self,
        txn: &mut T,
        user: &User,
        sample: &RatingSample,
        icon: &IconRef,
    ) -> LadderResult<bool> {
        let Some(new_rank) = sample.rank else {
            return Ok(false);
        };
        if user.highest_rank.is_some_and(|highest| highest >= new_rank) {
            return Ok(false);
        }
        let Some(prev) = txn.best_prior_sample(sample.account_id, sample.id).await? else {
            debug!(account = %sample.account_id, "no prior rated sample, skipping promotion check");
            return Ok(false);
        };
        let Some(prev_rank) = prev.rank else {
            return Ok(false);
        };
        if new_rank <= prev_rank {
            return Ok(false);
        }

        info!(
            user = %user.id,
            old_rank = %prev_rank,
            new_rank = %new_rank,
            "rank increased, sending congrats"
        );
        self.sink.promote(user.id, new_rank, icon).await;
        txn.set_highest_rank(user.id, new_rank).await?;
        Ok(true)
    }
}
