//! In-memory member directory

use async_trait::async_trait;
use dashmap::DashMap;
use readshare_core::{DomainResult, MemberDirectory, MemberId, MemberProfile, RoomId};

/// Member directory backed by a concurrent map
///
/// Thread-safe; clones of the inner map are shared via the containing `Arc`
/// at the composition root.
#[derive(Debug, Default)]
pub struct InMemoryMemberDirectory {
    members: DashMap<MemberId, MemberProfile>,
}

impl InMemoryMemberDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: DashMap::new(),
        }
    }

    /// Register or replace a member profile
    pub fn upsert(&self, profile: MemberProfile) {
        self.members.insert(profile.id, profile);
    }

    /// Convenience: register a member with a fresh id
    pub fn register(&self, display_name: &str, room_id: Option<RoomId>) -> MemberProfile {
        let profile = MemberProfile::new(MemberId::generate(), display_name, room_id);
        self.upsert(profile.clone());
        profile
    }

    /// Remove a member (e.g., account deletion)
    pub fn remove(&self, id: MemberId) -> Option<MemberProfile> {
        self.members.remove(&id).map(|(_, profile)| profile)
    }

    /// Number of registered members
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn find_member(&self, id: MemberId) -> DomainResult<Option<MemberProfile>> {
        Ok(self.members.get(&id).map(|entry| entry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_registered_member() {
        let directory = InMemoryMemberDirectory::new();
        let room = RoomId::generate();
        let profile = directory.register("alice", Some(room));

        let found = directory.find_member(profile.id).await.unwrap();
        assert_eq!(found, Some(profile));
    }

    #[tokio::test]
    async fn test_find_unknown_member() {
        let directory = InMemoryMemberDirectory::new();
        let found = directory.find_member(MemberId::generate()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_remove_member() {
        let directory = InMemoryMemberDirectory::new();
        let profile = directory.register("bob", None);

        assert!(directory.remove(profile.id).is_some());
        assert!(directory.find_member(profile.id).await.unwrap().is_none());
    }
}
