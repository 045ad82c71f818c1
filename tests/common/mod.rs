// Shared test fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use swipe_match::models::{CandidateQuery, Credential, Member, MemberId, SwipeRecord};
use swipe_match::services::{IdentityStore, MatchStore, MemoryStore, PreferenceStore, StoreError};

pub fn create_member(name: &str, age: u32, gender: &str, lat: f64, lon: f64) -> Member {
    Member::new(
        format!("{}@example.com", name),
        Credential::new("secret"),
        name,
        gender,
        age,
        lat,
        lon,
    )
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection reset".to_string())
}

/// Delegates to a [`MemoryStore`], failing the calls it is told to fail
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    fail_commits: AtomicBool,
    fail_listing: AtomicBool,
    /// 1-based index of the `get_preference` call that fails, 0 for none
    fail_preference_call: AtomicUsize,
    pub preference_calls: AtomicUsize,
    pub commits: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_commits(self) -> Self {
        self.fail_commits.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_listing(self) -> Self {
        self.fail_listing.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_preference_call(self, call: usize) -> Self {
        self.fail_preference_call.store(call, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl IdentityStore for FlakyStore {
    async fn get_member_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        self.inner.get_member_by_id(id).await
    }

    async fn get_member_by_email(&self, email: &str) -> Result<Option<Member>, StoreError> {
        self.inner.get_member_by_email(email).await
    }

    async fn put_member(&self, member: &Member) -> Result<(), StoreError> {
        self.inner.put_member(member).await
    }

    async fn scan_eligible_members(&self, query: &CandidateQuery) -> Result<Vec<Member>, StoreError> {
        self.inner.scan_eligible_members(query).await
    }
}

#[async_trait]
impl PreferenceStore for FlakyStore {
    async fn put_preference(&self, swipe: &SwipeRecord) -> Result<(), StoreError> {
        self.inner.put_preference(swipe).await
    }

    async fn get_preference(
        &self,
        swiper_id: MemberId,
        swiped_id: MemberId,
    ) -> Result<Option<SwipeRecord>, StoreError> {
        let call = self.preference_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_preference_call.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.get_preference(swiper_id, swiped_id).await
    }

    async fn list_swiped_ids(&self, swiper_id: MemberId) -> Result<HashSet<MemberId>, StoreError> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.list_swiped_ids(swiper_id).await
    }
}

#[async_trait]
impl MatchStore for FlakyStore {
    async fn commit_swipe(
        &self,
        swipe: &SwipeRecord,
        updated_target: &Member,
        expected_version: i64,
    ) -> Result<(), StoreError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner
            .commit_swipe(swipe, updated_target, expected_version)
            .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}
