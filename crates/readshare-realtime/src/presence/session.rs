//! Session bindings
//!
//! Maps opaque transport session ids to the members they authenticate. At
//! most one binding per session id; several sessions may bind the same
//! member.

use dashmap::DashMap;
use readshare_core::MemberId;

/// Session id to member id bindings for the structured transport
#[derive(Debug, Default)]
pub struct SessionBindings {
    bindings: DashMap<String, MemberId>,
}

impl SessionBindings {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: DashMap::new(),
        }
    }

    /// Bind a session to a member, replacing any previous binding
    pub fn bind(&self, session_id: &str, member_id: MemberId) {
        self.bindings.insert(session_id.to_string(), member_id);
        tracing::debug!(session_id = %session_id, member_id = %member_id, "Session bound");
    }

    /// Remove a binding, returning the member it pointed at
    pub fn unbind(&self, session_id: &str) -> Option<MemberId> {
        let removed = self.bindings.remove(session_id).map(|(_, member_id)| member_id);
        if let Some(member_id) = removed {
            tracing::debug!(session_id = %session_id, member_id = %member_id, "Session unbound");
        }
        removed
    }

    /// Look up the member a session authenticates
    #[must_use]
    pub fn member_for(&self, session_id: &str) -> Option<MemberId> {
        self.bindings.get(session_id).map(|entry| *entry)
    }

    /// Number of live bindings
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.bindings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_lookup() {
        let bindings = SessionBindings::new();
        let member = MemberId::generate();

        bindings.bind("s1", member);
        assert_eq!(bindings.member_for("s1"), Some(member));
        assert_eq!(bindings.session_count(), 1);
    }

    #[test]
    fn test_unbind_removes_binding() {
        let bindings = SessionBindings::new();
        let member = MemberId::generate();

        bindings.bind("s1", member);
        assert_eq!(bindings.unbind("s1"), Some(member));
        assert_eq!(bindings.unbind("s1"), None);
        assert!(bindings.member_for("s1").is_none());
    }

    #[test]
    fn test_multiple_sessions_same_member() {
        let bindings = SessionBindings::new();
        let member = MemberId::generate();

        bindings.bind("s1", member);
        bindings.bind("s2", member);

        assert_eq!(bindings.member_for("s1"), Some(member));
        assert_eq!(bindings.member_for("s2"), Some(member));
        assert_eq!(bindings.session_count(), 2);
    }
}
