use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::RwLock;

use crate::core::filters::matches_query_constraints;
use crate::models::{CandidateQuery, Member, MemberId, SwipeRecord};
use crate::services::store::{IdentityStore, MatchStore, PreferenceStore, StoreError};

#[derive(Default)]
struct Tables {
    // BTreeMap keeps scans in id (creation) order
    members: BTreeMap<MemberId, Member>,
    emails: HashMap<String, MemberId>,
    swipes: HashMap<(MemberId, MemberId), SwipeRecord>,
}

/// In-process store for local development and tests
///
/// Both tables sit behind one lock so `commit_swipe` is atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn member_count(&self) -> usize {
        self.tables.read().await.members.len()
    }

    pub async fn swipe_count(&self) -> usize {
        self.tables.read().await.swipes.len()
    }
}

fn upsert_member(tables: &mut Tables, member: &Member) -> Result<(), StoreError> {
    if let Some(owner) = tables.emails.get(&member.email) {
        if *owner != member.id {
            return Err(StoreError::Conflict(format!(
                "email {} already belongs to another member",
                member.email
            )));
        }
    }

    if let Some(previous) = tables.members.get(&member.id) {
        if previous.email != member.email {
            tables.emails.remove(&previous.email);
        }
    }

    tables.emails.insert(member.email.clone(), member.id);
    tables.members.insert(member.id, member.clone());
    Ok(())
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn get_member_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        Ok(self.tables.read().await.members.get(&id).cloned())
    }

    async fn get_member_by_email(&self, email: &str) -> Result<Option<Member>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .emails
            .get(email)
            .and_then(|id| tables.members.get(id))
            .cloned())
    }

    async fn put_member(&self, member: &Member) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        upsert_member(&mut tables, member)
    }

    async fn scan_eligible_members(&self, query: &CandidateQuery) -> Result<Vec<Member>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .values()
            .filter(|member| matches_query_constraints(member, query))
            .take(query.limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn put_preference(&self, swipe: &SwipeRecord) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .swipes
            .insert((swipe.swiper_id, swipe.swiped_id), swipe.clone());
        Ok(())
    }

    async fn get_preference(
        &self,
        swiper_id: MemberId,
        swiped_id: MemberId,
    ) -> Result<Option<SwipeRecord>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .swipes
            .get(&(swiper_id, swiped_id))
            .cloned())
    }

    async fn list_swiped_ids(&self, swiper_id: MemberId) -> Result<HashSet<MemberId>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .swipes
            .keys()
            .filter(|(swiper, _)| *swiper == swiper_id)
            .map(|(_, swiped)| *swiped)
            .collect())
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn commit_swipe(
        &self,
        swipe: &SwipeRecord,
        target: &Member,
        expected_version: i64,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;

        let current = tables
            .members
            .get(&target.id)
            .ok_or_else(|| StoreError::Missing {
                entity: "member",
                id: target.id.to_string(),
            })?;
        if current.version != expected_version {
            return Err(StoreError::StaleWrite { id: target.id });
        }

        let mut updated = target.clone();
        updated.version = expected_version + 1;

        tables
            .swipes
            .insert((swipe.swiper_id, swipe.swiped_id), swipe.clone());
        tables.members.insert(updated.id, updated);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Credential, SwipePreference};

    fn member(email: &str, age: u32, gender: &str) -> Member {
        Member::new(email, Credential::new("pw"), "Test", gender, age, 0.0, 0.0)
    }

    #[tokio::test]
    async fn test_email_index() {
        let store = MemoryStore::new();
        let m = member("a@example.com", 30, "F");
        store.put_member(&m).await.unwrap();

        let found = store.get_member_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, m.id);
        assert!(store.get_member_by_email("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store.put_member(&member("a@example.com", 30, "F")).await.unwrap();

        let result = store.put_member(&member("a@example.com", 31, "M")).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(store.member_count().await, 1);
    }

    #[tokio::test]
    async fn test_preference_upsert() {
        let store = MemoryStore::new();
        let a = member("a@example.com", 30, "F");
        let b = member("b@example.com", 30, "M");

        store
            .put_preference(&SwipeRecord::new(a.id, b.id, SwipePreference::Negative))
            .await
            .unwrap();
        store
            .put_preference(&SwipeRecord::new(a.id, b.id, SwipePreference::Positive))
            .await
            .unwrap();

        assert_eq!(store.swipe_count().await, 1);
        let stored = store.get_preference(a.id, b.id).await.unwrap().unwrap();
        assert_eq!(stored.preference, SwipePreference::Positive);
        assert!(store.get_preference(b.id, a.id).await.unwrap().is_none());
        assert_eq!(store.list_swiped_ids(a.id).await.unwrap(), HashSet::from([b.id]));
    }

    #[tokio::test]
    async fn test_commit_swipe_rejects_stale_version() {
        let store = MemoryStore::new();
        let a = member("a@example.com", 30, "F");
        let b = member("b@example.com", 30, "M");
        store.put_member(&b).await.unwrap();

        let swipe = SwipeRecord::new(a.id, b.id, SwipePreference::Positive);
        let updated = b.with_received_swipe(SwipePreference::Positive);

        store.commit_swipe(&swipe, &updated, 0).await.unwrap();
        let result = store.commit_swipe(&swipe, &updated, 0).await;
        assert!(matches!(result, Err(StoreError::StaleWrite { .. })));

        let stored = store.get_member_by_id(b.id).await.unwrap().unwrap();
        assert_eq!(stored.total_swipes_received, 1);
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn test_commit_swipe_for_missing_member_writes_nothing() {
        let store = MemoryStore::new();
        let a = member("a@example.com", 30, "F");
        let ghost = member("ghost@example.com", 30, "M");

        let swipe = SwipeRecord::new(a.id, ghost.id, SwipePreference::Positive);
        let result = store.commit_swipe(&swipe, &ghost, 0).await;

        assert!(matches!(result, Err(StoreError::Missing { .. })));
        assert_eq!(store.swipe_count().await, 0);
    }

    #[tokio::test]
    async fn test_scan_respects_query() {
        let store = MemoryStore::new();
        let young = member("y@example.com", 19, "F");
        let match_me = member("m@example.com", 28, "F");
        let excluded = member("x@example.com", 28, "F");
        let wrong_gender = member("w@example.com", 28, "M");
        for m in [&young, &match_me, &excluded, &wrong_gender] {
            store.put_member(m).await.unwrap();
        }

        let query = CandidateQuery {
            exclude_ids: vec![excluded.id],
            min_age: Some(21),
            max_age: Some(35),
            gender: Some("F".to_string()),
            limit: 10,
        };

        let found = store.scan_eligible_members(&query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, match_me.id);
    }
}
