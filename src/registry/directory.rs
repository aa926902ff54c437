/// Directory — the aggregate root for users and groups.
///
/// Owns both arenas and the distinguished "Root" group created at
/// construction. Handles are arena indices and stay valid forever: no
/// deletion operation exists. All mutating operations take explicit
/// targets; the Directory never reads presentation-layer selection state.
///
/// Every rejection is all-or-nothing. Compound operations
/// (duplicate-check-then-insert, containment-check-then-attach) assume a
/// single writer: the Directory is `&mut self` throughout and carries no
/// internal locking. A concurrent embedding must serialize mutations
/// behind one lock or mailbox.

use thiserror::Error;

use crate::notify::{PostSink, SinkId};
use crate::registry::group::Group;
use crate::registry::ids::{GroupHandle, GroupId, UserHandle, UserId};
use crate::registry::user::User;

/// Id of the distinguished root group every Directory starts with.
pub const ROOT_GROUP_ID: &str = "Root";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("User {0} already exists")]
    DuplicateUser(UserId),

    #[error("Group {0} already exists")]
    DuplicateGroup(GroupId),

    #[error("User {0} is already in another group")]
    ContainmentConflict(UserId),

    #[error("No valid target selected")]
    InvalidSelection,

    #[error("Group {0} is already attached to a parent")]
    AlreadyAttached(GroupId),

    #[error("Attaching group {0} here would create a cycle")]
    WouldCreateCycle(GroupId),
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Directory {
    users: Vec<User>,
    groups: Vec<Group>,
    root: GroupHandle,
}

impl Directory {
    /// Create an empty Directory holding only the root group.
    pub fn new() -> Self {
        Directory {
            users: Vec::new(),
            groups: vec![Group::new(ROOT_GROUP_ID)],
            root: GroupHandle(0),
        }
    }

    pub fn root(&self) -> GroupHandle {
        self.root
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Resolve a user handle. Stale handles cannot arise from this
    /// Directory, but handles from another instance surface here.
    pub fn user(&self, handle: UserHandle) -> Result<&User, DirectoryError> {
        self.users.get(handle.0).ok_or(DirectoryError::InvalidSelection)
    }

    pub fn group(&self, handle: GroupHandle) -> Result<&Group, DirectoryError> {
        self.groups.get(handle.0).ok_or(DirectoryError::InvalidSelection)
    }

    /// All registered users, in creation order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All groups, root first, then in creation order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Linear scan by id, as the original flat registration list did.
    pub fn find_user(&self, id: &str) -> Option<UserHandle> {
        self.users
            .iter()
            .position(|user| user.id().as_str() == id)
            .map(UserHandle)
    }

    pub fn find_group(&self, id: &str) -> Option<GroupHandle> {
        self.groups
            .iter()
            .position(|group| group.id().as_str() == id)
            .map(GroupHandle)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a user and append it to `target`'s direct members.
    ///
    /// Rejects with `DuplicateUser` if the id is taken (no mutation), and
    /// with `InvalidSelection` if `target` does not resolve.
    pub fn add_user(
        &mut self,
        id: impl Into<UserId>,
        target: GroupHandle,
    ) -> Result<UserHandle, DirectoryError> {
        let id = id.into();
        if self.find_user(id.as_str()).is_some() {
            log::warn!("User {} already exists", id);
            return Err(DirectoryError::DuplicateUser(id));
        }
        self.group(target)?;

        let handle = UserHandle(self.users.len());
        self.users.push(User::new(id.clone()));
        self.groups[target.0].members.push(handle);
        log::info!("Added user {} to {}", id, self.groups[target.0].id());
        Ok(handle)
    }

    /// Create a detached group (registered, but not yet in the tree).
    ///
    /// Group ids are unique across the whole Directory, root included.
    pub fn new_group(&mut self, id: impl Into<GroupId>) -> Result<GroupHandle, DirectoryError> {
        let id = id.into();
        if self.find_group(id.as_str()).is_some() {
            log::warn!("Group {} already exists", id);
            return Err(DirectoryError::DuplicateGroup(id));
        }

        let handle = GroupHandle(self.groups.len());
        self.groups.push(Group::new(id));
        Ok(handle)
    }

    /// Create a group and attach it under `parent`. Any rejection leaves
    /// the parent's child list untouched.
    pub fn add_group(
        &mut self,
        id: impl Into<GroupId>,
        parent: GroupHandle,
    ) -> Result<GroupHandle, DirectoryError> {
        self.group(parent)?;
        let candidate = self.new_group(id)?;
        // A freshly created group has no members and no parent, so the
        // attach below cannot be rejected.
        self.attach_subgroup(parent, candidate)?;
        Ok(candidate)
    }

    /// Attach `candidate` as a child of `parent`, enforcing
    /// single-containment over the subtree rooted at `parent`.
    ///
    /// Checks, in order:
    /// 1. both handles resolve;
    /// 2. `parent` does not lie inside `candidate`'s subtree (the tree
    ///    stays acyclic) and `candidate` is not already attached;
    /// 3. every direct member of `candidate`, in sequence order, is absent
    ///    from the entire subtree rooted at `parent`. The first conflict
    ///    aborts with that user's id; later members are not examined.
    ///
    /// The walk does not descend into `candidate`'s own sub-groups, so
    /// members of its nested groups are not vetted. That matches the
    /// original behavior; callers attaching deep trees must vet each level
    /// as they build it.
    pub fn attach_subgroup(
        &mut self,
        parent: GroupHandle,
        candidate: GroupHandle,
    ) -> Result<(), DirectoryError> {
        self.group(parent)?;
        self.group(candidate)?;

        if self.subtree_contains_group(candidate, parent) {
            return Err(DirectoryError::WouldCreateCycle(
                self.groups[candidate.0].id().clone(),
            ));
        }
        if self.groups[candidate.0].parent.is_some() {
            return Err(DirectoryError::AlreadyAttached(
                self.groups[candidate.0].id().clone(),
            ));
        }

        for &member in &self.groups[candidate.0].members {
            if self.subtree_contains_user(parent, member) {
                let id = self.users[member.0].id().clone();
                log::warn!("User {} is already in another group", id);
                return Err(DirectoryError::ContainmentConflict(id));
            }
        }

        self.groups[parent.0].sub_groups.push(candidate);
        self.groups[candidate.0].parent = Some(parent);
        log::info!(
            "Added group {} to {}",
            self.groups[candidate.0].id(),
            self.groups[parent.0].id()
        );
        Ok(())
    }

    /// Pass-through to `Group::add_member` (no duplicate or cross-group
    /// guard, by contract).
    pub fn add_member(
        &mut self,
        group: GroupHandle,
        user: UserHandle,
    ) -> Result<(), DirectoryError> {
        self.user(user)?;
        self.group(group)?;
        self.groups[group.0].members.push(user);
        Ok(())
    }

    /// Record that `follower` now follows `followee`. Both directions of
    /// the link are kept as weak handles. Self-follow is rejected.
    pub fn follow(
        &mut self,
        follower: UserHandle,
        followee: UserHandle,
    ) -> Result<(), DirectoryError> {
        self.user(follower)?;
        self.user(followee)?;
        if follower == followee {
            return Err(DirectoryError::InvalidSelection);
        }

        self.users[follower.0].following.push(followee);
        self.users[followee.0].followers.push(follower);
        log::info!(
            "User {} now follows {}",
            self.users[follower.0].id(),
            self.users[followee.0].id()
        );
        Ok(())
    }

    /// Post on behalf of a user. Subscriber delivery completes before
    /// this returns.
    pub fn post(
        &mut self,
        user: UserHandle,
        text: impl Into<String>,
    ) -> Result<(), DirectoryError> {
        self.user(user)?;
        self.users[user.0].post(text);
        Ok(())
    }

    /// Register a sink on a user's posts.
    pub fn subscribe(
        &mut self,
        user: UserHandle,
        sink: Box<dyn PostSink>,
    ) -> Result<SinkId, DirectoryError> {
        self.user(user)?;
        Ok(self.users[user.0].subscribe(sink))
    }

    /// Drop a subscription. `Ok(false)` if the id was not registered.
    pub fn unsubscribe(
        &mut self,
        user: UserHandle,
        id: SinkId,
    ) -> Result<bool, DirectoryError> {
        self.user(user)?;
        Ok(self.users[user.0].unsubscribe(id))
    }

    // -----------------------------------------------------------------------
    // Counts
    // -----------------------------------------------------------------------

    pub fn total_users(&self) -> usize {
        self.users.len()
    }

    /// Admin-created groups. The distinguished root is not a registered
    /// group and is excluded from the count.
    pub fn total_groups(&self) -> usize {
        self.groups.len() - 1
    }

    /// Sum of feed lengths over all users.
    pub fn total_posts(&self) -> usize {
        self.users.iter().map(|user| user.feed().len()).sum()
    }

    // -----------------------------------------------------------------------
    // Subtree walks
    // -----------------------------------------------------------------------

    /// Whether `user` appears as a direct member anywhere in the subtree
    /// rooted at `root` (root's own members included).
    fn subtree_contains_user(&self, root: GroupHandle, user: UserHandle) -> bool {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let group = &self.groups[handle.0];
            if group.members.contains(&user) {
                return true;
            }
            stack.extend(group.sub_groups.iter().copied());
        }
        false
    }

    /// Whether `needle` is `root` or lies anywhere in `root`'s subtree.
    fn subtree_contains_group(&self, root: GroupHandle, needle: GroupHandle) -> bool {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            if handle == needle {
                return true;
            }
            stack.extend(self.groups[handle.0].sub_groups.iter().copied());
        }
        false
    }
}

impl Default for Directory {
    fn default() -> Self {
        Directory::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
