//! Presence registry
//!
//! Authoritative in-memory map of currently-active members, keyed by member
//! id. Uses `DashMap` for thread-safe access without external locking; a
//! member holding several transport sessions still contributes exactly one
//! entry, and any session's activity refreshes it.

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use readshare_core::{MemberId, MemberProfile, RoomId};
use std::time::Duration;

/// One currently-active member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEntry {
    pub member_id: MemberId,
    pub display_name: String,
    /// `None` for members active but not yet associated with a room
    pub room_id: Option<RoomId>,
    pub last_activity: DateTime<Utc>,
}

impl PresenceEntry {
    fn from_profile(profile: &MemberProfile) -> Self {
        Self {
            member_id: profile.id,
            display_name: profile.display_name.clone(),
            room_id: profile.room_id,
            last_activity: Utc::now(),
        }
    }
}

/// In-memory registry of active members with time-based expiry
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    entries: DashMap<MemberId, PresenceEntry>,
}

impl PresenceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Insert or refresh an entry, stamping `last_activity = now`
    ///
    /// Returns the previous entry; `None` means the member was newly active,
    /// which is what gates the one-time join side effects upstream.
    pub fn upsert(&self, profile: &MemberProfile) -> Option<PresenceEntry> {
        let previous = self
            .entries
            .insert(profile.id, PresenceEntry::from_profile(profile));

        if previous.is_some() {
            tracing::debug!(member_id = %profile.id, "Member already active, refreshed entry");
        } else {
            tracing::info!(
                member_id = %profile.id,
                display_name = %profile.display_name,
                "Member is now active"
            );
        }

        previous
    }

    /// Refresh the activity timestamp only; no-op if the member is absent
    pub fn touch(&self, member_id: MemberId) -> bool {
        match self.entries.get_mut(&member_id) {
            Some(mut entry) => {
                entry.last_activity = Utc::now();
                tracing::trace!(member_id = %member_id, "Activity refreshed");
                true
            }
            None => false,
        }
    }

    /// Remove an entry, returning the removed snapshot
    pub fn remove(&self, member_id: MemberId) -> Option<PresenceEntry> {
        self.entries.remove(&member_id).map(|(_, entry)| entry)
    }

    /// Point-in-time snapshot of all active members
    ///
    /// May be stale by the time the caller looks at it; that is acceptable
    /// for the read path.
    #[must_use]
    pub fn list_active(&self) -> Vec<PresenceEntry> {
        self.entries.iter().map(|entry| entry.clone()).collect()
    }

    /// Atomically remove every entry idle for longer than `ttl`
    ///
    /// Returns exactly the entries this call removed. The expiry check is
    /// re-evaluated inside `remove_if`, so two concurrent sweepers (or a
    /// sweep racing an explicit disconnect) never report the same entry
    /// twice, and an entry touched mid-scan survives.
    pub fn sweep_expired(&self, ttl: Duration) -> Vec<PresenceEntry> {
        let cutoff = Utc::now() - TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);

        let candidates: Vec<MemberId> = self
            .entries
            .iter()
            .filter(|entry| entry.last_activity < cutoff)
            .map(|entry| entry.member_id)
            .collect();

        candidates
            .into_iter()
            .filter_map(|member_id| {
                self.entries
                    .remove_if(&member_id, |_, entry| entry.last_activity < cutoff)
                    .map(|(_, entry)| entry)
            })
            .collect()
    }

    /// Number of active members
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
