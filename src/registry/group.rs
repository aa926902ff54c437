/// Group entity — a named container of users and child groups.
///
/// Membership at this level is deliberately unguarded: `add_member`
/// appends without duplicate or cross-group checks. The single-containment
/// invariant is enforced only at attach time by
/// `Directory::attach_subgroup`, which needs arena access for the subtree
/// walk.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::registry::ids::{GroupHandle, GroupId, UserHandle};

pub struct Group {
    pub(crate) id: GroupId,
    pub(crate) created_at: DateTime<Utc>,
    /// Direct members. Non-owning; a user's lifetime is independent of
    /// any group membership.
    pub(crate) members: Vec<UserHandle>,
    /// Child groups, in attach order.
    pub(crate) sub_groups: Vec<GroupHandle>,
    /// Set exactly once, at attach time. Keeps attachment a strict tree
    /// insertion: an attached group can never gain a second parent.
    pub(crate) parent: Option<GroupHandle>,
}

impl Group {
    pub fn new(id: impl Into<GroupId>) -> Self {
        Group {
            id: id.into(),
            created_at: Utc::now(),
            members: Vec::new(),
            sub_groups: Vec::new(),
            parent: None,
        }
    }

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn members(&self) -> &[UserHandle] {
        &self.members
    }

    pub fn sub_groups(&self) -> &[GroupHandle] {
        &self.sub_groups
    }

    pub fn parent(&self) -> Option<GroupHandle> {
        self.parent
    }

    /// Unconditional append. Calling twice with the same user produces a
    /// duplicate entry; the attach-time containment check is the only
    /// cross-group guard.
    pub fn add_member(&mut self, user: UserHandle) {
        self.members.push(user);
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("id", &self.id)
            .field("members", &self.members)
            .field("sub_groups", &self.sub_groups)
            .field("parent", &self.parent)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_group_is_empty_and_detached() {
        let group = Group::new("teamA");
        assert_eq!(group.id().as_str(), "teamA");
        assert!(group.members().is_empty());
        assert!(group.sub_groups().is_empty());
        assert!(group.parent().is_none());
    }

    #[test]
    fn test_add_member_allows_duplicates() {
        let mut group = Group::new("teamA");
        let alice = UserHandle(0);
        group.add_member(alice);
        group.add_member(alice);

        // No duplicate guard at this level, by contract.
        assert_eq!(group.members(), &[alice, alice]);
    }
}
