use crate::models::SwipePreference;

/// Score given to members who have not received any swipes yet
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Ratio of positive to total received swipes (0-1)
///
/// Falls back to [`NEUTRAL_SCORE`] when nothing has been received.
#[inline]
pub fn attractiveness_score(yes_swipes: u64, total_swipes: u64) -> f64 {
    if total_swipes == 0 {
        return NEUTRAL_SCORE;
    }

    (yes_swipes.min(total_swipes) as f64 / total_swipes as f64).clamp(0.0, 1.0)
}

/// Fold one incoming swipe into a member's counters
///
/// # Returns
/// `(yes_swipes, total_swipes, score)` after the swipe
#[inline]
pub fn record_swipe(
    yes_swipes: u64,
    total_swipes: u64,
    preference: SwipePreference,
) -> (u64, u64, f64) {
    let total = total_swipes.saturating_add(1);
    let yes = if preference.is_positive() {
        yes_swipes.saturating_add(1)
    } else {
        yes_swipes
    };

    (yes, total, attractiveness_score(yes, total))
}
