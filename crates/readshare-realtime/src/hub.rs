//! Notification hub
//!
//! Fan-out broadcaster over both transports: empty trigger payloads on the
//! structured topics ("something changed, re-fetch via REST"), and full JSON
//! payloads pushed to every connection on a room's raw channel. Delivery is
//! best-effort: per-recipient failures are logged and discarded, never
//! propagated to the caller.

use crate::channel::RoomChannelRegistry;
use crate::payloads::{ChatMessageView, NewMessageSignal, ProgressUpdate};
use chrono::{DateTime, Utc};
use readshare_core::{MemberId, RoomId, TopicPublisher};
use serde::Serialize;
use std::sync::Arc;

/// Structured transport topic names
pub mod topics {
    use readshare_core::RoomId;

    /// Global "new messages available" trigger
    pub const MESSAGES_UPDATE: &str = "chat.messages.update";

    /// Global "active user list changed" trigger
    pub const USERS_UPDATE: &str = "chat.users.update";

    /// Per-room "new messages available" trigger
    #[must_use]
    pub fn room_messages_update(room_id: RoomId) -> String {
        format!("chat.room.{room_id}.messages.update")
    }
}

/// Broadcasts notifications to connected clients
///
/// Composes the structured topic publisher and the raw room channel
/// registry; callers decide what and when, the hub decides how.
pub struct NotificationHub {
    publisher: Arc<dyn TopicPublisher>,
    channels: Arc<RoomChannelRegistry>,
}

impl NotificationHub {
    pub fn new(publisher: Arc<dyn TopicPublisher>, channels: Arc<RoomChannelRegistry>) -> Self {
        Self { publisher, channels }
    }

    /// The raw channel registry this hub delivers through
    pub fn channels(&self) -> &RoomChannelRegistry {
        &self.channels
    }

    /// Signal all clients that new messages are available
    ///
    /// The payload is intentionally empty; clients fetch the latest messages
    /// via the REST API upon receiving the trigger.
    pub async fn publish_message_update(&self) {
        self.publish_trigger(topics::MESSAGES_UPDATE).await;
    }

    /// Signal clients subscribed to one room that new messages are available
    pub async fn publish_room_message_update(&self, room_id: RoomId) {
        self.publish_trigger(&topics::room_messages_update(room_id)).await;
    }

    /// Signal all clients that the active user list changed
    pub async fn publish_users_update(&self) {
        self.publish_trigger(topics::USERS_UPDATE).await;
    }

    async fn publish_trigger(&self, topic: &str) {
        if let Err(e) = self.publisher.publish(topic, "").await {
            tracing::warn!(topic = %topic, error = %e, "Trigger publish failed");
        } else {
            tracing::debug!(topic = %topic, "Trigger published");
        }
    }

    /// Push a chat message to every connection on the room's raw channel
    pub async fn broadcast_chat_message(&self, room_id: RoomId, message: &ChatMessageView) {
        self.broadcast_raw(room_id, message);
    }

    /// Push a "new message" ping to the room's raw channel
    pub async fn broadcast_new_message_signal(&self, room_id: RoomId, sent_at: DateTime<Utc>) {
        self.broadcast_raw(room_id, &NewMessageSignal::new(room_id, sent_at));
    }

    /// Push a reading-progress update to the room's raw channel
    pub async fn broadcast_progress(
        &self,
        room_id: RoomId,
        percent: u8,
        member_id: MemberId,
        current_page: u32,
    ) {
        self.broadcast_raw(
            room_id,
            &ProgressUpdate::new(room_id, percent, member_id, current_page),
        );
    }

    /// Serialize once, then deliver to each connection independently
    ///
    /// A failure on one connection never blocks or drops delivery to the
    /// healthy peers; a connection that cannot receive right now simply
    /// misses this message. Removal from the registry only ever happens via
    /// the explicit close callback.
    fn broadcast_raw<T: Serialize>(&self, room_id: RoomId, payload: &T) {
        let json = match serde_json::to_string(payload) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(room_id = %room_id, error = %e, "Payload serialization failed");
                return;
            }
        };

        let connections = self.channels.connections_for(room_id);
        if connections.is_empty() {
            tracing::trace!(room_id = %room_id, "No raw channel subscribers");
            return;
        }

        let mut sent = 0;
        for connection in &connections {
            match connection.try_send(json.clone()) {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::debug!(
                        room_id = %room_id,
                        connection_id = %connection.id(),
                        error = %e,
                        "Raw delivery failed, skipping connection"
                    );
                }
            }
        }

        tracing::trace!(
            room_id = %room_id,
            sent = sent,
            total = connections.len(),
            "Raw payload broadcast"
        );
    }
}

impl std::fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub")
            .field("channels", &self.channels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::RoomConnection;
    use async_trait::async_trait;
    use readshare_core::DomainResult;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    /// Records every publish for assertions
    #[derive(Default)]
    struct RecordingPublisher {
        published: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl TopicPublisher for RecordingPublisher {
        async fn publish(&self, topic: &str, payload: &str) -> DomainResult<()> {
            self.published
                .lock()
                .unwrap()
                .push((topic.to_string(), payload.to_string()));
            Ok(())
        }
    }

    fn hub() -> (Arc<RecordingPublisher>, Arc<RoomChannelRegistry>, NotificationHub) {
        let publisher = Arc::new(RecordingPublisher::default());
        let channels = Arc::new(RoomChannelRegistry::new());
        let hub = NotificationHub::new(publisher.clone(), channels.clone());
        (publisher, channels, hub)
    }

    #[tokio::test]
    async fn test_triggers_use_expected_topics() {
        let (publisher, _, hub) = hub();
        let room = RoomId::generate();

        hub.publish_message_update().await;
        hub.publish_room_message_update(room).await;
        hub.publish_users_update().await;

        let published = publisher.published.lock().unwrap();
        assert_eq!(published[0].0, "chat.messages.update");
        assert_eq!(published[1].0, format!("chat.room.{room}.messages.update"));
        assert_eq!(published[2].0, "chat.users.update");
        // Triggers carry no payload
        assert!(published.iter().all(|(_, payload)| payload.is_empty()));
    }

    #[tokio::test]
    async fn test_broadcast_to_empty_room_is_noop() {
        let (_, _, hub) = hub();
        // Must not panic or error
        hub.broadcast_new_message_signal(RoomId::generate(), Utc::now()).await;
    }

    #[tokio::test]
    async fn test_one_dead_connection_does_not_block_peers() {
        let (_, channels, hub) = hub();
        let room = RoomId::generate();

        let (dead_tx, dead_rx) = mpsc::channel(4);
        drop(dead_rx); // simulate an already-closed socket
        channels.join(room, RoomConnection::with_id("dead".to_string(), dead_tx));

        let (live_tx, mut live_rx) = mpsc::channel(4);
        channels.join(room, RoomConnection::with_id("live".to_string(), live_tx));

        hub.broadcast_progress(room, 50, MemberId::generate(), 42).await;

        let delivered = live_rx.recv().await.expect("live peer should receive");
        let json: serde_json::Value = serde_json::from_str(&delivered).unwrap();
        assert_eq!(json["event"], "progressUpdate");
        assert_eq!(json["percent"], 50);
    }

    #[tokio::test]
    async fn test_identical_payload_to_all_connections() {
        let (_, channels, hub) = hub();
        let room = RoomId::generate();

        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, mut rx_b) = mpsc::channel(4);
        channels.join(room, RoomConnection::with_id("a".to_string(), tx_a));
        channels.join(room, RoomConnection::with_id("b".to_string(), tx_b));

        hub.broadcast_new_message_signal(room, Utc::now()).await;

        let a = rx_a.recv().await.unwrap();
        let b = rx_b.recv().await.unwrap();
        assert_eq!(a, b);
    }
}
