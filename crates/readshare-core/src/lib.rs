//! # readshare-core
//!
//! Domain layer containing id value objects, chat records, and the traits the
//! realtime subsystem calls on its collaborators.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod error;
pub mod ids;
pub mod member;
pub mod record;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{DomainError, DomainResult};
pub use ids::{IdParseError, MemberId, RoomId};
pub use member::MemberProfile;
pub use record::{ChatRecord, RecordKind};
pub use traits::{ChatRecordStore, MemberDirectory, TopicPublisher};
