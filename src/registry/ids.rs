/// Identity types for the membership registry.
///
/// - `UserId` / `GroupId`: caller-supplied string identifiers, unique per
///   kind (uniqueness enforced by `Directory`, not here)
/// - `UserHandle` / `GroupHandle`: arena indices handed out by `Directory`,
///   the non-owning references used for follow links and group membership

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// Caller-supplied user identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        UserId(s)
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// GroupId
// ---------------------------------------------------------------------------

/// Caller-supplied group identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        GroupId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        GroupId(s.to_string())
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        GroupId(s)
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupId({})", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Non-owning reference to a user slot in the `Directory` arena.
///
/// Handles stay valid for the process lifetime because no deletion
/// operation exists anywhere in the registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserHandle(pub(crate) usize);

impl UserHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for UserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserHandle({})", self.0)
    }
}

impl fmt::Display for UserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user#{}", self.0)
    }
}

/// Non-owning reference to a group slot in the `Directory` arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupHandle(pub(crate) usize);

impl GroupHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for GroupHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupHandle({})", self.0)
    }
}

impl fmt::Display for GroupHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display_is_bare_string() {
        let id = UserId::from("alice");
        assert_eq!(id.to_string(), "alice");
        assert_eq!(id.as_str(), "alice");
        assert_eq!(format!("{:?}", id), "UserId(alice)");
    }

    #[test]
    fn test_group_id_equality() {
        assert_eq!(GroupId::from("teamA"), GroupId::new("teamA"));
        assert_ne!(GroupId::from("teamA"), GroupId::from("teamB"));
    }

    #[test]
    fn test_handles_are_ordered_by_slot() {
        assert!(UserHandle(0) < UserHandle(1));
        assert_eq!(GroupHandle(3).index(), 3);
        assert_eq!(UserHandle(7).to_string(), "user#7");
    }

    #[test]
    fn test_id_serde_roundtrip() {
        let id = UserId::from("bob");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bob\"");
        let decoded: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, decoded);
    }
}
