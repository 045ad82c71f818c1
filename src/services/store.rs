use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

use crate::models::{CandidateQuery, Member, MemberId, SwipeRecord};

/// Errors that can occur when talking to a store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Stale write for member {id}")]
    StaleWrite { id: MemberId },

    #[error("{entity} {id} is missing")]
    Missing { entity: &'static str, id: String },

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Member records, keyed by id with a unique secondary index on email
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn get_member_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError>;

    async fn get_member_by_email(&self, email: &str) -> Result<Option<Member>, StoreError>;

    /// Insert or replace a member. A different member holding the same email is a conflict.
    async fn put_member(&self, member: &Member) -> Result<(), StoreError>;

    /// Members outside `query.exclude_ids` that satisfy the age and gender bounds,
    /// at most `query.limit` of them
    async fn scan_eligible_members(&self, query: &CandidateQuery) -> Result<Vec<Member>, StoreError>;
}

/// Swipe records, one per (swiper, swiped) pair
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Upsert; a later swipe on the same pair replaces the earlier one
    async fn put_preference(&self, swipe: &SwipeRecord) -> Result<(), StoreError>;

    async fn get_preference(
        &self,
        swiper_id: MemberId,
        swiped_id: MemberId,
    ) -> Result<Option<SwipeRecord>, StoreError>;

    async fn list_swiped_ids(&self, swiper_id: MemberId) -> Result<HashSet<MemberId>, StoreError>;
}

/// Full storage collaborator used by discovery and match detection
#[async_trait]
pub trait MatchStore: IdentityStore + PreferenceStore {
    /// Upsert `swipe`, then write `target`'s counters, as one atomic unit.
    ///
    /// The member write only applies while the stored version equals
    /// `expected_version`; otherwise nothing is written and `StaleWrite` is returned.
    async fn commit_swipe(
        &self,
        swipe: &SwipeRecord,
        target: &Member,
        expected_version: i64,
    ) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
