//! Member profile
//!
//! The slice of the account/room data the realtime subsystem needs: who a
//! member is and which room they currently belong to.

use crate::ids::{MemberId, RoomId};
use serde::{Deserialize, Serialize};

/// A member as seen by the realtime subsystem
///
/// `room_id` is `None` for members who are signed in but not currently
/// associated with any reading room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: MemberId,
    pub display_name: String,
    pub room_id: Option<RoomId>,
}

impl MemberProfile {
    /// Create a profile for a member inside a room
    pub fn new(id: MemberId, display_name: impl Into<String>, room_id: Option<RoomId>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            room_id,
        }
    }
}
