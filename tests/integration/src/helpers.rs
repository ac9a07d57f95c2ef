//! Test helpers for integration tests
//!
//! Builds the full realtime stack (registries, coordinator, hub, broker)
//! over in-memory stores, and exposes the receiving ends of subscriber and
//! room-channel connections so tests can assert on actual delivery.

use readshare_core::RoomId;
use readshare_gateway::{ServerMessage, TopicBroker};
use readshare_realtime::{
    NotificationHub, PresenceLifecycleCoordinator, PresenceRegistry, RoomChannelRegistry,
    RoomConnection, SessionBindings,
};
use readshare_store::{InMemoryChatRecordStore, InMemoryMemberDirectory};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Buffer for test delivery channels
const CHANNEL_BUFFER: usize = 32;

/// The realtime stack wired the way the gateway wires it
pub struct RealtimeHarness {
    pub coordinator: Arc<PresenceLifecycleCoordinator>,
    pub hub: Arc<NotificationHub>,
    pub broker: Arc<TopicBroker>,
    pub channels: Arc<RoomChannelRegistry>,
    pub directory: Arc<InMemoryMemberDirectory>,
    pub records: Arc<InMemoryChatRecordStore>,
}

impl RealtimeHarness {
    /// Build a fresh stack with empty stores
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryMemberDirectory::new());
        let records = Arc::new(InMemoryChatRecordStore::new());
        let channels = Arc::new(RoomChannelRegistry::new());
        let broker = Arc::new(TopicBroker::new());
        let hub = Arc::new(NotificationHub::new(broker.clone(), channels.clone()));

        let coordinator = Arc::new(PresenceLifecycleCoordinator::new(
            Arc::new(PresenceRegistry::new()),
            Arc::new(SessionBindings::new()),
            directory.clone(),
            records.clone(),
            hub.clone(),
        ));

        Self {
            coordinator,
            hub,
            broker,
            channels,
            directory,
            records,
        }
    }

    /// Register a structured session subscribed to the given topics
    ///
    /// Returns the receiving end of the session's outbound channel.
    pub fn subscribe_session(
        &self,
        session_id: &str,
        topics: &[&str],
    ) -> mpsc::Receiver<ServerMessage> {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER);
        self.broker.register_session(session_id, tx);
        for topic in topics {
            self.broker.subscribe(session_id, topic);
        }
        rx
    }

    /// Open a raw notification channel into a room
    ///
    /// Returns the connection id and the receiving end of its channel.
    pub fn open_room_channel(&self, room_id: RoomId) -> (String, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER);
        let connection = RoomConnection::new(tx);
        let connection_id = connection.id().to_string();
        self.channels.join(room_id, connection);
        (connection_id, rx)
    }

    /// Open a raw notification channel whose receiver is already gone
    pub fn open_dead_room_channel(&self, room_id: RoomId) -> String {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER);
        drop(rx);
        let connection = RoomConnection::new(tx);
        let connection_id = connection.id().to_string();
        self.channels.join(room_id, connection);
        connection_id
    }
}

impl Default for RealtimeHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain everything currently buffered in a receiver
pub fn drain<T>(rx: &mut mpsc::Receiver<T>) -> Vec<T> {
    let mut out = Vec::new();
    while let Ok(item) = rx.try_recv() {
        out.push(item);
    }
    out
}
