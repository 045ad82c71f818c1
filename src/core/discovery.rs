use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::core::cancellable;
use crate::core::filters::{eligible_candidates, DiscoveryFilter};
use crate::core::ranker::rank_candidates;
use crate::error::{MatchError, Result};
use crate::models::{CandidateView, MemberId};
use crate::services::MatchStore;

/// Discovery pipeline
///
/// # Pipeline Stages
/// 1. Load the requester (position, identity)
/// 2. Exclude the requester and every member they already swiped
/// 3. Age and gender filtering, capped at the requested limit
/// 4. Ranking by proximity (or attractiveness)
#[derive(Clone)]
pub struct Discovery {
    store: Arc<dyn MatchStore>,
}

impl Discovery {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// Ranked, unseen candidates for `requester_id`
    ///
    /// # Errors
    /// * `Inconsistent` if the authenticated requester has no member record
    /// * `Invalid` for a zero limit or inverted age bounds
    /// * `Transient` / `Cancelled` for store trouble or an abandoned request
    pub async fn discover(
        &self,
        requester_id: MemberId,
        filter: &DiscoveryFilter,
        cancel: &CancellationToken,
    ) -> Result<Vec<CandidateView>> {
        let requester = cancellable(cancel, self.store.get_member_by_id(requester_id))
            .await?
            .ok_or_else(|| {
                MatchError::Inconsistent(format!(
                    "authenticated member {} has no member record",
                    requester_id
                ))
            })?;

        let candidates =
            eligible_candidates(self.store.as_ref(), &requester, filter, cancel).await?;
        let total_candidates = candidates.len();

        let ranked = rank_candidates(
            requester.latitude,
            requester.longitude,
            candidates,
            filter.sort_by,
        );

        tracing::info!(
            requester_id = %requester_id,
            count = total_candidates,
            sort_by = ?filter.sort_by,
            "Discovered candidates"
        );

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ranker::SortBy;
    use crate::models::{Credential, Member, SwipePreference, SwipeRecord};
    use crate::services::{IdentityStore, MemoryStore, PreferenceStore};

    fn create_member(name: &str, age: u32, gender: &str, lat: f64, lon: f64) -> Member {
        Member::new(
            format!("{}@example.com", name),
            Credential::new("pw"),
            name,
            gender,
            age,
            lat,
            lon,
        )
    }

    async fn seeded() -> (Arc<MemoryStore>, Member, Vec<Member>) {
        let store = Arc::new(MemoryStore::new());
        let requester = create_member("me", 30, "M", 40.7128, -74.0060);
        let others = vec![
            create_member("brooklyn", 28, "F", 40.6782, -73.9442),
            create_member("midtown", 26, "F", 40.7580, -73.9855),
            create_member("boston", 31, "F", 42.3601, -71.0589),
            create_member("older", 60, "F", 40.7130, -74.0050),
            create_member("male", 29, "M", 40.7130, -74.0050),
        ];
        store.put_member(&requester).await.unwrap();
        for m in &others {
            store.put_member(m).await.unwrap();
        }
        (store, requester, others)
    }

    #[tokio::test]
    async fn test_discover_filters_and_ranks() {
        let (store, requester, _) = seeded().await;
        let discovery = Discovery::new(store);

        let filter = DiscoveryFilter::from_params(20, 35, "F", 10);
        let results = discovery
            .discover(requester.id, &filter, &CancellationToken::new())
            .await
            .unwrap();

        let names: Vec<&str> = results.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["midtown", "brooklyn", "boston"]);
    }

    #[tokio::test]
    async fn test_discover_hides_swiped_members() {
        let (store, requester, others) = seeded().await;
        store
            .put_preference(&SwipeRecord::new(requester.id, others[1].id, SwipePreference::Negative))
            .await
            .unwrap();
        store
            .put_preference(&SwipeRecord::new(requester.id, others[0].id, SwipePreference::Positive))
            .await
            .unwrap();

        let discovery = Discovery::new(store);
        let filter = DiscoveryFilter::from_params(0, 0, "", 10);
        let results = discovery
            .discover(requester.id, &filter, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        for c in &results {
            assert_ne!(c.id, requester.id);
            assert_ne!(c.id, others[0].id);
            assert_ne!(c.id, others[1].id);
        }
    }

    #[tokio::test]
    async fn test_unknown_requester_is_inconsistent() {
        let (store, _, _) = seeded().await;
        let discovery = Discovery::new(store);

        let filter = DiscoveryFilter::from_params(0, 0, "", 10);
        let result = discovery
            .discover(uuid::Uuid::now_v7(), &filter, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(MatchError::Inconsistent(_))));
    }

    #[tokio::test]
    async fn test_sort_by_attractiveness() {
        let (store, requester, others) = seeded().await;
        let mut popular = others[2].clone();
        popular.attractiveness_score = 0.9;
        store.put_member(&popular).await.unwrap();

        let discovery = Discovery::new(store);
        let filter = DiscoveryFilter::from_params(20, 35, "F", 10).sorted_by(SortBy::Attractiveness);
        let results = discovery
            .discover(requester.id, &filter, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(results[0].name, "boston");
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let (store, requester, _) = seeded().await;
        let discovery = Discovery::new(store);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let filter = DiscoveryFilter::from_params(0, 0, "", 10);
        let result = discovery.discover(requester.id, &filter, &cancel).await;

        assert!(matches!(result, Err(MatchError::Cancelled)));
    }
}
