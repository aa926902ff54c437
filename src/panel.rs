/// Presentation-boundary facade: a `Directory` plus the mutable tree
/// selection the original admin panel kept in its tree widget.
///
/// The core never reads this state; every `Directory` mutation takes its
/// target explicitly. The panel resolves the current selection, forwards,
/// and reports `InvalidSelection` when nothing suitable is selected.

use crate::notify::{PostSink, SinkId};
use crate::registry::directory::{Directory, DirectoryError};
use crate::registry::ids::{GroupHandle, GroupId, UserHandle, UserId};

/// A node in the two-level admin tree: either a group or a user leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRef {
    Group(GroupHandle),
    User(UserHandle),
}

pub struct ControlPanel {
    directory: Directory,
    selection: Option<NodeRef>,
}

impl ControlPanel {
    /// A fresh panel starts with the root group selected, as the original
    /// tree view did.
    pub fn new() -> Self {
        let directory = Directory::new();
        let selection = Some(NodeRef::Group(directory.root()));
        ControlPanel {
            directory,
            selection,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut Directory {
        &mut self.directory
    }

    pub fn selection(&self) -> Option<NodeRef> {
        self.selection
    }

    pub fn select(&mut self, node: NodeRef) {
        self.selection = Some(node);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn selected_group(&self) -> Result<GroupHandle, DirectoryError> {
        match self.selection {
            Some(NodeRef::Group(group)) => Ok(group),
            _ => Err(DirectoryError::InvalidSelection),
        }
    }

    /// Add a user under the currently selected group. Users can only be
    /// added to a group node, never to another user or to nothing.
    pub fn add_user(&mut self, id: impl Into<UserId>) -> Result<UserHandle, DirectoryError> {
        let target = self.selected_group()?;
        self.directory.add_user(id, target)
    }

    /// Add a group under the currently selected group.
    pub fn add_group(&mut self, id: impl Into<GroupId>) -> Result<GroupHandle, DirectoryError> {
        let parent = self.selected_group()?;
        self.directory.add_group(id, parent)
    }

    /// Subscribe a view to the selected user's posts, the way the
    /// original user view registered itself as an observer on open.
    pub fn open_user_view(&mut self, sink: Box<dyn PostSink>) -> Result<SinkId, DirectoryError> {
        match self.selection {
            Some(NodeRef::User(user)) => self.directory.subscribe(user, sink),
            _ => Err(DirectoryError::InvalidSelection),
        }
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        ControlPanel::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
