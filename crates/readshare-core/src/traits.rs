//! Collaborator traits
//!
//! Narrow contracts the realtime subsystem calls on the rest of the system.
//! Implementations live in infrastructure crates; tests substitute in-memory
//! or recording doubles.

use crate::error::DomainResult;
use crate::ids::{MemberId, RoomId};
use crate::member::MemberProfile;
use crate::record::ChatRecord;
use async_trait::async_trait;

/// Resolves member identity and room association
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Look up a member by id; `None` if unknown or already deleted
    async fn find_member(&self, id: MemberId) -> DomainResult<Option<MemberProfile>>;
}

/// Write path for chat history, including synthetic system entries
#[async_trait]
pub trait ChatRecordStore: Send + Sync {
    /// Append a "joined" record to the room's history
    async fn append_join(&self, room_id: RoomId, member: &MemberProfile)
        -> DomainResult<ChatRecord>;

    /// Append a "left" record to the room's history
    async fn append_leave(
        &self,
        room_id: RoomId,
        member: &MemberProfile,
    ) -> DomainResult<ChatRecord>;
}

/// Delivery primitive for the structured (topic-subscription) transport
///
/// The broker is assumed to manage fan-out itself; callers only decide what
/// to publish and when. An empty payload is the "re-fetch via REST" trigger.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Publish a payload to every subscriber of `topic`
    async fn publish(&self, topic: &str, payload: &str) -> DomainResult<()>;
}
