//! Raw room channels
//!
//! Per-room sets of live socket connections used for direct payload push,
//! distinct from the structured topic-subscription transport.

mod connection;
mod registry;

pub use connection::RoomConnection;
pub use registry::RoomChannelRegistry;
