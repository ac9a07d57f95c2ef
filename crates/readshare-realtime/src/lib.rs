//! # readshare-realtime
//!
//! Realtime presence and notification fan-out for the readshare backend:
//! tracks which members are currently active in which room, expires stale
//! entries on a periodic sweep, records synthetic join/leave chat entries,
//! and pushes best-effort notifications to connected clients over two
//! transports (topic subscriptions and raw per-room channels).
//!
//! All shared containers are lock-free concurrent maps; the services here
//! are dependency-injected singletons with process lifetime.

pub mod channel;
pub mod hub;
pub mod payloads;
pub mod presence;
pub mod sweep;

pub use channel::{RoomChannelRegistry, RoomConnection};
pub use hub::{topics, NotificationHub};
pub use payloads::{ChatMessageView, NewMessageSignal, ProgressUpdate};
pub use presence::{
    PresenceEntry, PresenceLifecycleCoordinator, PresenceRegistry, SessionBindings,
};
pub use sweep::IdleSweeper;
