/// Membership registry — users, the group tree, and the aggregate root.
///
/// Users and groups live in arenas owned by the `Directory`; everything
/// else refers to them through copyable handles. The group tree enforces
/// single containment at attach time: a user may appear as a direct
/// member of at most one group within a given subtree.
///
/// # Module structure
/// - `ids` — UserId/GroupId string identifiers and arena handles
/// - `user` — User entity: feed, follow links, subscriber sinks
/// - `group` — Group entity: direct members and child groups
/// - `directory` — Directory aggregate root: create, attach, count

pub mod directory;
pub mod group;
pub mod ids;
pub mod user;

// Re-export core types for convenience
pub use directory::{Directory, DirectoryError, ROOT_GROUP_ID};
pub use group::Group;
pub use ids::{GroupHandle, GroupId, UserHandle, UserId};
pub use user::{FeedEntry, User};
