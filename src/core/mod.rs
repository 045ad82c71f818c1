// Core algorithm exports
pub mod attractiveness;
pub mod discovery;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod ranker;

pub use attractiveness::{attractiveness_score, record_swipe, NEUTRAL_SCORE};
pub use discovery::Discovery;
pub use distance::haversine_distance;
pub use filters::{build_candidate_query, eligible_candidates, matches_query_constraints, DiscoveryFilter};
pub use matcher::MatchDetector;
pub use ranker::{rank_candidates, SortBy};

use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::MatchError;
use crate::services::StoreError;

/// Run one store call, abandoning it as soon as `cancel` fires
pub(crate) async fn cancellable<T, F>(cancel: &CancellationToken, call: F) -> Result<T, MatchError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(MatchError::Cancelled),
        result = call => result.map_err(MatchError::from),
    }
}
