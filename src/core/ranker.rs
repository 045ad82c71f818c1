use serde::{Deserialize, Serialize};

use crate::core::distance::haversine_distance;
use crate::models::{CandidateView, Member};

/// Ordering applied to discovery results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Nearest first
    #[default]
    Distance,
    /// Highest attractiveness first, nearest first among equals
    Attractiveness,
}

/// Project members into candidate views and order them relative to `origin`
///
/// Uses a stable sort, so candidates that compare equal keep their input order.
pub fn rank_candidates(
    origin_lat: f64,
    origin_lon: f64,
    members: Vec<Member>,
    sort_by: SortBy,
) -> Vec<CandidateView> {
    let mut views: Vec<CandidateView> = members
        .into_iter()
        .map(|member| {
            let distance_km =
                haversine_distance(origin_lat, origin_lon, member.latitude, member.longitude);
            CandidateView::from_member(member, distance_km)
        })
        .collect();

    match sort_by {
        SortBy::Distance => {
            views.sort_by(|a, b| a.distance_from_requester.total_cmp(&b.distance_from_requester));
        }
        SortBy::Attractiveness => {
            views.sort_by(|a, b| {
                b.attractiveness_score
                    .total_cmp(&a.attractiveness_score)
                    .then_with(|| a.distance_from_requester.total_cmp(&b.distance_from_requester))
            });
        }
    }

    views
}
