//! Presence lifecycle coordinator
//!
//! Drives the Absent/Active state transitions (connect, heartbeat,
//! disconnect, timeout eviction) and their side effects: synthetic join and
//! leave chat records plus notification fan-out. Presence bookkeeping is
//! never blocked by a downstream failure; lookup misses and append errors
//! are logged and the transition completes anyway.

use super::{PresenceEntry, PresenceRegistry, SessionBindings};
use crate::hub::NotificationHub;
use crate::payloads::ChatMessageView;
use readshare_core::{ChatRecordStore, MemberDirectory, MemberId, MemberProfile, RoomId};
use std::sync::Arc;
use std::time::Duration;

/// Orchestrates presence state transitions and their side effects
pub struct PresenceLifecycleCoordinator {
    registry: Arc<PresenceRegistry>,
    sessions: Arc<SessionBindings>,
    directory: Arc<dyn MemberDirectory>,
    records: Arc<dyn ChatRecordStore>,
    hub: Arc<NotificationHub>,
}

impl PresenceLifecycleCoordinator {
    pub fn new(
        registry: Arc<PresenceRegistry>,
        sessions: Arc<SessionBindings>,
        directory: Arc<dyn MemberDirectory>,
        records: Arc<dyn ChatRecordStore>,
        hub: Arc<NotificationHub>,
    ) -> Self {
        Self {
            registry,
            sessions,
            directory,
            records,
            hub,
        }
    }

    /// The presence registry (read path for "who is active")
    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    /// The session bindings
    pub fn sessions(&self) -> &SessionBindings {
        &self.sessions
    }

    /// Handle a transport session connecting as a member
    ///
    /// Binds the session and marks the member active. The first session of a
    /// member with a room also appends a JOIN chat record and publishes it;
    /// further sessions of an already-active member only refresh the entry.
    pub async fn on_connect(&self, session_id: &str, member_id: MemberId) {
        self.sessions.bind(session_id, member_id);

        let profile = match self.directory.find_member(member_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                tracing::warn!(member_id = %member_id, "Member not found, skipping presence entry");
                return;
            }
            Err(e) => {
                tracing::warn!(member_id = %member_id, error = %e, "Member lookup failed");
                return;
            }
        };

        let was_already_active = self.registry.upsert(&profile).is_some();

        tracing::info!(
            session_id = %session_id,
            member_id = %member_id,
            already_active = was_already_active,
            "Member connected"
        );

        if !was_already_active {
            if let Some(room_id) = profile.room_id {
                self.append_join_record(room_id, &profile).await;
            }
        }

        self.hub.publish_users_update().await;
    }

    /// Handle activity on a session (subscribe, heartbeat)
    ///
    /// An unbound session or an absent member is harmless: the session may
    /// have disconnected, or the sweep may have evicted the entry between
    /// the client's sends.
    pub async fn on_heartbeat(&self, session_id: &str) {
        let Some(member_id) = self.sessions.member_for(session_id) else {
            tracing::trace!(session_id = %session_id, "Heartbeat from unbound session");
            return;
        };

        if !self.registry.touch(member_id) {
            tracing::trace!(
                member_id = %member_id,
                "Heartbeat for absent member (raced eviction)"
            );
        }
    }

    /// Handle a transport session disconnecting
    ///
    /// Symmetric with connect: unbinds the session, removes the presence
    /// entry, appends a LEAVE chat record, and publishes. Side effects fire
    /// only if an entry was actually removed, so a disconnect racing the
    /// sweep converges without double-reporting.
    pub async fn on_disconnect(&self, session_id: &str) {
        let Some(member_id) = self.sessions.unbind(session_id) else {
            tracing::debug!(session_id = %session_id, "Disconnect for unknown session");
            return;
        };

        tracing::info!(session_id = %session_id, member_id = %member_id, "Member disconnected");

        let Some(_removed) = self.registry.remove(member_id) else {
            // Already evicted by the sweep; the transition happened once
            tracing::debug!(member_id = %member_id, "Presence entry already removed");
            return;
        };

        match self.directory.find_member(member_id).await {
            Ok(Some(profile)) => {
                if let Some(room_id) = profile.room_id {
                    self.append_leave_record(room_id, &profile).await;
                }
            }
            Ok(None) => {
                tracing::warn!(member_id = %member_id, "Member not found, skipping leave record");
            }
            Err(e) => {
                tracing::warn!(member_id = %member_id, error = %e, "Member lookup failed");
            }
        }

        self.hub.publish_users_update().await;
    }

    /// Evict every member idle longer than `ttl`
    ///
    /// Called by the periodic sweep. Publishes a users-changed trigger per
    /// eviction but deliberately appends no LEAVE chat record: a network
    /// timeout is not a user-initiated leave.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let evicted: Vec<PresenceEntry> = self.registry.sweep_expired(ttl);

        for entry in &evicted {
            tracing::info!(
                member_id = %entry.member_id,
                display_name = %entry.display_name,
                "Evicted idle member"
            );
            self.hub.publish_users_update().await;
        }

        evicted.len()
    }

    async fn append_join_record(&self, room_id: RoomId, profile: &MemberProfile) {
        match self.records.append_join(room_id, profile).await {
            Ok(record) => {
                tracing::debug!(
                    member_id = %profile.id,
                    room_id = %room_id,
                    "Join record created"
                );
                self.publish_record(room_id, &ChatMessageView::from(&record)).await;
            }
            Err(e) => {
                tracing::warn!(
                    member_id = %profile.id,
                    room_id = %room_id,
                    error = %e,
                    "Failed to append join record"
                );
            }
        }
    }

    async fn append_leave_record(&self, room_id: RoomId, profile: &MemberProfile) {
        match self.records.append_leave(room_id, profile).await {
            Ok(record) => {
                tracing::debug!(
                    member_id = %profile.id,
                    room_id = %room_id,
                    "Leave record created"
                );
                self.publish_record(room_id, &ChatMessageView::from(&record)).await;
            }
            Err(e) => {
                tracing::warn!(
                    member_id = %profile.id,
                    room_id = %room_id,
                    error = %e,
                    "Failed to append leave record"
                );
            }
        }
    }

    /// Fan a persisted record out on both transports
    async fn publish_record(&self, room_id: RoomId, view: &ChatMessageView) {
        self.hub.broadcast_chat_message(room_id, view).await;
        self.hub.publish_message_update().await;
        self.hub.publish_room_message_update(room_id).await;
    }
}

impl std::fmt::Debug for PresenceLifecycleCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceLifecycleCoordinator")
            .field("active", &self.registry.len())
            .field("sessions", &self.sessions.session_count())
            .finish()
    }
}
