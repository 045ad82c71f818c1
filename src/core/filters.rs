use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

use crate::core::cancellable;
use crate::core::ranker::SortBy;
use crate::error::{MatchError, Result};
use crate::models::{CandidateQuery, Member, MemberId};
use crate::services::MatchStore;

/// Attribute filters for one discovery call
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryFilter {
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub gender: Option<String>,
    pub limit: usize,
    pub sort_by: SortBy,
}

impl DiscoveryFilter {
    /// Build from raw boundary values, where `0` and `""` mean "no bound"
    pub fn from_params(min_age: u32, max_age: u32, gender: &str, limit: usize) -> Self {
        let gender = gender.trim();

        Self {
            min_age: (min_age > 0).then_some(min_age),
            max_age: (max_age > 0).then_some(max_age),
            gender: (!gender.is_empty()).then(|| gender.to_string()),
            limit,
            sort_by: SortBy::default(),
        }
    }

    pub fn sorted_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(MatchError::Invalid("limit must be positive".to_string()));
        }

        if let (Some(min), Some(max)) = (self.min_age, self.max_age) {
            if min > max {
                return Err(MatchError::Invalid(format!(
                    "minAge {} is greater than maxAge {}",
                    min, max
                )));
            }
        }

        Ok(())
    }
}

/// Build the store query that excludes the requester and everyone they already swiped
pub fn build_candidate_query(
    requester_id: MemberId,
    swiped_ids: &HashSet<MemberId>,
    filter: &DiscoveryFilter,
) -> CandidateQuery {
    let mut exclude_ids = Vec::with_capacity(swiped_ids.len() + 1);
    exclude_ids.push(requester_id);
    exclude_ids.extend(swiped_ids.iter().copied().filter(|id| *id != requester_id));
    // Sorted so the same inputs always produce the same query
    exclude_ids[1..].sort_unstable();

    CandidateQuery {
        exclude_ids,
        min_age: filter.min_age,
        max_age: filter.max_age,
        gender: filter.gender.clone(),
        limit: filter.limit,
    }
}

/// Check if a member satisfies the candidate query constraints
#[inline]
pub fn matches_query_constraints(member: &Member, query: &CandidateQuery) -> bool {
    // Check excluded members
    if query.exclude_ids.contains(&member.id) {
        return false;
    }

    // Check age range
    if let Some(min_age) = query.min_age {
        if member.age < min_age {
            return false;
        }
    }
    if let Some(max_age) = query.max_age {
        if member.age > max_age {
            return false;
        }
    }

    // Check gender
    if let Some(gender) = &query.gender {
        if &member.gender != gender {
            return false;
        }
    }

    true
}

/// Eligible, unseen, unranked candidates for `requester`
///
/// Predicates are re-applied to the store's answer, so the exclusion invariant holds
/// even for a store that only partially honors the query.
pub async fn eligible_candidates(
    store: &dyn MatchStore,
    requester: &Member,
    filter: &DiscoveryFilter,
    cancel: &CancellationToken,
) -> Result<Vec<Member>> {
    filter.validate()?;

    let swiped_ids = cancellable(cancel, store.list_swiped_ids(requester.id)).await?;
    tracing::debug!(
        "Excluding {} swiped members for {}",
        swiped_ids.len(),
        requester.id
    );

    let query = build_candidate_query(requester.id, &swiped_ids, filter);
    let mut candidates = cancellable(cancel, store.scan_eligible_members(&query)).await?;

    let returned = candidates.len();
    candidates.retain(|member| matches_query_constraints(member, &query));
    if candidates.len() != returned {
        tracing::warn!(
            "Store returned {} members outside the query for {}",
            returned - candidates.len(),
            requester.id
        );
    }
    candidates.truncate(query.limit);

    Ok(candidates)
}
