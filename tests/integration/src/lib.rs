//! Integration test utilities for the readshare realtime subsystem
//!
//! This crate provides helpers for wiring the presence coordinator, topic
//! broker, and room channels together the way the gateway does, with
//! in-memory store collaborators and observable delivery channels.

pub mod helpers;

pub use helpers::*;
