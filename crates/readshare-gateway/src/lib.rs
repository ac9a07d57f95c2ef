//! # readshare-gateway
//!
//! WebSocket gateway exposing the realtime subsystem over two transports:
//! a structured topic-subscription socket (`/ws/gateway`) and raw per-room
//! notification channels (`/ws/notifications/{room_id}`).

pub mod broker;
pub mod protocol;
pub mod server;

pub use broker::TopicBroker;
pub use protocol::{ClientMessage, ServerMessage};
pub use server::{create_app, create_gateway_state, run, GatewayState};
