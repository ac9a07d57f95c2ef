//! # readshare-store
//!
//! In-memory implementations of the collaborator traits from
//! `readshare-core`. Used by the gateway binary and by tests; a deployment
//! backed by a relational store would swap these for repository-backed
//! implementations without touching the realtime crate.

pub mod directory;
pub mod records;

pub use directory::InMemoryMemberDirectory;
pub use records::InMemoryChatRecordStore;
