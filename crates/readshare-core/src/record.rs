//! Chat records
//!
//! Persisted chat entries, including the synthetic JOIN/LEAVE records the
//! presence lifecycle appends on behalf of members.

use crate::ids::{MemberId, RoomId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of a chat record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    /// A regular message typed by a member
    Chat,
    /// Synthetic "x joined" entry appended on connect
    Join,
    /// Synthetic "x left" entry appended on explicit disconnect
    Leave,
}

impl RecordKind {
    /// Wire name used in broadcast payloads
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "CHAT",
            Self::Join => "JOIN",
            Self::Leave => "LEAVE",
        }
    }
}

/// A persisted chat entry in a room's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: Uuid,
    pub room_id: RoomId,
    pub sender_id: MemberId,
    pub sender_name: String,
    pub content: String,
    pub kind: RecordKind,
    pub sent_at: DateTime<Utc>,
}

impl ChatRecord {
    /// Create a record with a fresh id, stamped now
    pub fn create(
        room_id: RoomId,
        sender_id: MemberId,
        sender_name: impl Into<String>,
        content: impl Into<String>,
        kind: RecordKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id,
            sender_id,
            sender_name: sender_name.into(),
            content: content.into(),
            kind,
            sent_at: Utc::now(),
        }
    }

    /// Synthetic join entry for a member entering a room
    pub fn join(room_id: RoomId, sender_id: MemberId, sender_name: &str) -> Self {
        Self::create(
            room_id,
            sender_id,
            sender_name,
            format!("{sender_name} joined"),
            RecordKind::Join,
        )
    }

    /// Synthetic leave entry for a member leaving a room
    pub fn leave(room_id: RoomId, sender_id: MemberId, sender_name: &str) -> Self {
        Self::create(
            room_id,
            sender_id,
            sender_name,
            format!("{sender_name} left"),
            RecordKind::Leave,
        )
    }
}
