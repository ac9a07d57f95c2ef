//! Individual raw channel connection
//!
//! Wraps the outbound half of one socket: the writer task owns the sink, the
//! registry holds the channel sender. Payloads are pre-serialized JSON text.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// A single open connection on a room's raw channel
pub struct RoomConnection {
    /// Unique connection id
    connection_id: String,

    /// Channel to the connection's writer task
    sender: mpsc::Sender<String>,

    /// Connection creation time
    opened_at: Instant,
}

impl RoomConnection {
    /// Create a new connection handle with a fresh id
    pub fn new(sender: mpsc::Sender<String>) -> Arc<Self> {
        Self::with_id(uuid::Uuid::new_v4().to_string(), sender)
    }

    /// Create a connection handle with an explicit id
    pub fn with_id(connection_id: String, sender: mpsc::Sender<String>) -> Arc<Self> {
        Arc::new(Self {
            connection_id,
            sender,
            opened_at: Instant::now(),
        })
    }

    /// Get the connection id
    pub fn id(&self) -> &str {
        &self.connection_id
    }

    /// Try to push a payload to this connection without blocking
    ///
    /// Fails if the writer task is gone or its buffer is full; callers treat
    /// either as a per-connection delivery failure.
    pub fn try_send(&self, payload: String) -> Result<(), mpsc::error::TrySendError<String>> {
        self.sender.try_send(payload)
    }

    /// Check if the writer side is gone
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.opened_at.elapsed()
    }
}

impl std::fmt::Debug for RoomConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomConnection")
            .field("connection_id", &self.connection_id)
            .field("opened_at", &self.opened_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_ids_are_unique() {
        let (tx, _rx) = mpsc::channel(4);
        let a = RoomConnection::new(tx.clone());
        let b = RoomConnection::new(tx);
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_try_send_delivers() {
        let (tx, mut rx) = mpsc::channel(4);
        let conn = RoomConnection::with_id("c1".to_string(), tx);

        conn.try_send("hello".to_string()).unwrap();
        assert_eq!(rx.recv().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_closed_connection_rejects_send() {
        let (tx, rx) = mpsc::channel(4);
        let conn = RoomConnection::with_id("c1".to_string(), tx);

        drop(rx);
        assert!(conn.is_closed());
        assert!(conn.try_send("hello".to_string()).is_err());
    }
}
