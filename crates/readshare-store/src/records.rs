//! In-memory chat record store

use async_trait::async_trait;
use dashmap::DashMap;
use readshare_core::{ChatRecord, ChatRecordStore, DomainResult, MemberProfile, RoomId};

/// Chat history backed by a concurrent map of per-room vectors
#[derive(Debug, Default)]
pub struct InMemoryChatRecordStore {
    history: DashMap<RoomId, Vec<ChatRecord>>,
}

impl InMemoryChatRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: DashMap::new(),
        }
    }

    fn append(&self, record: ChatRecord) -> ChatRecord {
        self.history
            .entry(record.room_id)
            .or_default()
            .push(record.clone());

        tracing::debug!(
            room_id = %record.room_id,
            kind = record.kind.as_str(),
            "Chat record appended"
        );

        record
    }

    /// Snapshot of a room's history, oldest first
    #[must_use]
    pub fn room_history(&self, room_id: RoomId) -> Vec<ChatRecord> {
        self.history
            .get(&room_id)
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatRecordStore for InMemoryChatRecordStore {
    async fn append_join(
        &self,
        room_id: RoomId,
        member: &MemberProfile,
    ) -> DomainResult<ChatRecord> {
        Ok(self.append(ChatRecord::join(room_id, member.id, &member.display_name)))
    }

    async fn append_leave(
        &self,
        room_id: RoomId,
        member: &MemberProfile,
    ) -> DomainResult<ChatRecord> {
        Ok(self.append(ChatRecord::leave(room_id, member.id, &member.display_name)))
    }
}
