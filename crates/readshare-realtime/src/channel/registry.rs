//! Room channel registry
//!
//! Tracks which raw connections are subscribed to which room. Room
//! membership is derived from the connection's request path at handshake
//! time; there is no cross-check against presence or authenticated identity.

use super::RoomConnection;
use dashmap::DashMap;
use readshare_core::RoomId;
use std::collections::HashSet;
use std::sync::Arc;

/// Per-room sets of open raw connections
///
/// Uses `DashMap` for concurrent access. A connection belongs to at most one
/// room at a time; joining a second room moves it.
#[derive(Debug, Default)]
pub struct RoomChannelRegistry {
    /// All connections by connection id
    connections: DashMap<String, (RoomId, Arc<RoomConnection>)>,

    /// Room id to connection ids mapping
    rooms: DashMap<RoomId, HashSet<String>>,
}

impl RoomChannelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    /// Add a connection to a room's set (idempotent)
    ///
    /// If the connection was previously in another room it is moved.
    pub fn join(&self, room_id: RoomId, connection: Arc<RoomConnection>) {
        let connection_id = connection.id().to_string();

        if let Some(previous) = self
            .connections
            .insert(connection_id.clone(), (room_id, connection))
        {
            let (previous_room, _) = previous;
            if previous_room != room_id {
                self.detach(previous_room, &connection_id);
            }
        }

        self.rooms
            .entry(room_id)
            .or_default()
            .insert(connection_id.clone());

        tracing::debug!(
            room_id = %room_id,
            connection_id = %connection_id,
            "Connection joined room channel"
        );
    }

    /// Remove a connection from a room's set
    ///
    /// No-op if the connection or room is unknown. Empty room sets are
    /// pruned so rooms do not accumulate.
    pub fn leave(&self, room_id: RoomId, connection_id: &str) {
        self.connections.remove(connection_id);
        self.detach(room_id, connection_id);

        tracing::debug!(
            room_id = %room_id,
            connection_id = %connection_id,
            "Connection left room channel"
        );
    }

    fn detach(&self, room_id: RoomId, connection_id: &str) {
        // Atomically modify the set, then prune empties; avoids a
        // check-then-remove race between concurrent leavers
        self.rooms.alter(&room_id, |_, mut connections| {
            connections.remove(connection_id);
            connections
        });
        self.rooms.retain(|_, connections| !connections.is_empty());
    }

    /// Current snapshot of a room's connections
    ///
    /// Empty vec (never an error) for unknown rooms.
    #[must_use]
    pub fn connections_for(&self, room_id: RoomId) -> Vec<Arc<RoomConnection>> {
        self.rooms
            .get(&room_id)
            .map(|connection_ids| {
                connection_ids
                    .iter()
                    .filter_map(|id| {
                        self.connections.get(id).map(|entry| entry.value().1.clone())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of rooms with at least one connection
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Total number of open connections
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
