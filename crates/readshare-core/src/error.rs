//! Domain errors - error types shared by collaborator contracts

use crate::ids::{MemberId, RoomId};
use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Publish error: {0}")]
    Publish(String),
}

impl DomainError {
    /// Check if this is a not-found error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MemberNotFound(_) | Self::RoomNotFound(_))
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
