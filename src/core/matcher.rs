use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::core::cancellable;
use crate::error::{MatchError, Result};
use crate::models::{MemberId, SwipeOutcome, SwipePreference, SwipeRecord};
use crate::services::MatchStore;

/// Records swipes and detects mutual positive preferences
///
/// # Steps (strictly sequential)
/// 1. Persist the swipe (upsert on the ordered pair)
/// 2. Fold it into the target's counters, atomically with step 1
/// 3. For positive swipes only, look up the reciprocal swipe
///
/// No lock is taken: the reciprocal check reads a record that the other side already
/// committed, so when two members swipe on each other concurrently each call reports
/// its own outcome independently.
#[derive(Clone)]
pub struct MatchDetector {
    store: Arc<dyn MatchStore>,
}

impl MatchDetector {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// Record `swiper_id`'s swipe on `swiped_id` and report whether it completed a match
    ///
    /// A repeated swipe with the same preference refreshes the record but is not
    /// counted again. A changed preference counts as a new received swipe, so one
    /// swiper alternating NO and YES keeps raising the target's totals and moves
    /// its score.
    ///
    /// # Errors
    /// * `Invalid` for a self-swipe
    /// * `NotFound` if the target does not exist
    /// * `Transient` if the store is unreachable or the target changed concurrently
    /// * `Inconsistent` if the target vanished before the commit
    /// * `Cancelled` if `cancel` fires while a store call is pending
    pub async fn swipe(
        &self,
        swiper_id: MemberId,
        swiped_id: MemberId,
        preference: SwipePreference,
        cancel: &CancellationToken,
    ) -> Result<SwipeOutcome> {
        if swiper_id == swiped_id {
            return Err(MatchError::Invalid("members cannot swipe on themselves".to_string()));
        }

        tracing::info!(
            swiper_id = %swiper_id,
            swiped_id = %swiped_id,
            preference = %preference,
            "Recording swipe"
        );

        let target = cancellable(cancel, self.store.get_member_by_id(swiped_id))
            .await?
            .ok_or_else(|| MatchError::not_found("member", swiped_id))?;

        let previous = cancellable(cancel, self.store.get_preference(swiper_id, swiped_id)).await?;
        let repeated = previous
            .as_ref()
            .is_some_and(|earlier| earlier.preference == preference);

        let updated_target = if repeated {
            tracing::debug!(
                swiper_id = %swiper_id,
                swiped_id = %swiped_id,
                "Repeated swipe, counters unchanged"
            );
            target.clone()
        } else {
            target.with_received_swipe(preference)
        };

        // Steps 1 and 2 commit together or not at all
        let record = SwipeRecord::new(swiper_id, swiped_id, preference);
        cancellable(
            cancel,
            self.store.commit_swipe(&record, &updated_target, target.version),
        )
        .await
        .inspect_err(|e| {
            tracing::error!(swiper_id = %swiper_id, swiped_id = %swiped_id, "Failed to commit swipe: {}", e);
        })?;

        if !preference.is_positive() {
            return Ok(SwipeOutcome::no_match());
        }

        let reciprocal = cancellable(cancel, self.store.get_preference(swiped_id, swiper_id)).await?;

        match reciprocal {
            Some(theirs) if theirs.preference.is_positive() => {
                tracing::info!(swiper_id = %swiper_id, swiped_id = %swiped_id, "Match found");
                Ok(SwipeOutcome::matched(swiped_id))
            }
            _ => Ok(SwipeOutcome::no_match()),
        }
    }
}
