//! Gateway wire protocol
//!
//! JSON messages exchanged on the structured socket. Clients identify with a
//! member id, subscribe to named topics, and heartbeat to stay active;
//! the server pushes topic payloads and acknowledgements.

use readshare_core::MemberId;
use serde::{Deserialize, Serialize};

/// Messages sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Bind this session to a member; drives the presence connect transition
    #[serde(rename_all = "camelCase")]
    Identify { member_id: MemberId },

    /// Subscribe to a topic; also counts as activity
    Subscribe { topic: String },

    /// Unsubscribe from a topic
    Unsubscribe { topic: String },

    /// Keep-alive; refreshes the member's presence entry
    Heartbeat,
}

/// Messages sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Sent once after the connection is registered
    #[serde(rename_all = "camelCase")]
    Ready { session_id: String },

    /// A payload published on a topic this session subscribes to
    Topic { topic: String, payload: String },

    /// Acknowledges a client heartbeat
    HeartbeatAck,
}

impl ClientMessage {
    /// Parse from a JSON text frame
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl ServerMessage {
    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
