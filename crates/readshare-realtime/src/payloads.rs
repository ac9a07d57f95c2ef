//! Raw channel wire payloads
//!
//! Flat JSON objects pushed over the per-room raw channels. Field names are
//! part of the client contract; keep them camelCase.

use chrono::{DateTime, Utc};
use readshare_core::{ChatRecord, MemberId, RoomId};
use serde::{Deserialize, Serialize};

/// A chat message as delivered to room subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageView {
    pub room_id: RoomId,
    pub sender_id: MemberId,
    pub sender_name: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub message_type: String,
}

impl From<&ChatRecord> for ChatMessageView {
    fn from(record: &ChatRecord) -> Self {
        Self {
            room_id: record.room_id,
            sender_id: record.sender_id,
            sender_name: record.sender_name.clone(),
            content: record.content.clone(),
            sent_at: record.sent_at,
            message_type: record.kind.as_str().to_string(),
        }
    }
}

/// Lightweight "new message available" ping; clients re-fetch via REST
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessageSignal {
    pub room_id: RoomId,
    pub event: &'static str,
    pub sent_at: DateTime<Utc>,
}

impl NewMessageSignal {
    pub const EVENT: &'static str = "newMessage";

    #[must_use]
    pub fn new(room_id: RoomId, sent_at: DateTime<Utc>) -> Self {
        Self {
            room_id,
            event: Self::EVENT,
            sent_at,
        }
    }
}

/// Reading progress update for a member in a room
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub room_id: RoomId,
    pub event: &'static str,
    pub percent: u8,
    pub user_id: MemberId,
    pub current_page: u32,
}

impl ProgressUpdate {
    pub const EVENT: &'static str = "progressUpdate";

    #[must_use]
    pub fn new(room_id: RoomId, percent: u8, user_id: MemberId, current_page: u32) -> Self {
        Self {
            room_id,
            event: Self::EVENT,
            percent,
            user_id,
            current_page,
        }
    }
}
