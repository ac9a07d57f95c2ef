//! Presence tracking
//!
//! The authoritative in-memory view of who is currently active, plus the
//! session bindings and the lifecycle coordinator that drives state
//! transitions and their side effects.

mod coordinator;
mod registry;
mod session;

pub use coordinator::PresenceLifecycleCoordinator;
pub use registry::{PresenceEntry, PresenceRegistry};
pub use session::SessionBindings;
