//! # MiniTwitter Core
//!
//! **User/group membership, post notification, and feed analytics for the
//! MiniTwitter demo.**
//!
//! This crate is the headless core behind the MiniTwitter admin panel and
//! per-user views: an arena-backed registry of users, a group tree that
//! enforces single containment at attach time, a synchronous post
//! notification channel, and stateless feed analytics. Rendering and
//! widget wiring stay in the embedding application; the only surfaces the
//! core knows about are explicit target handles and [`notify::PostSink`]
//! callbacks.
//!
//! ## Quick start
//!
//! ```rust
//! use minitwitter_core::registry::Directory;
//!
//! let mut dir = Directory::new();
//! let root = dir.root();
//! let alice = dir.add_user("alice", root)?;
//! dir.post(alice, "good morning")?;
//! assert_eq!(dir.total_posts(), 1);
//! # Ok::<(), minitwitter_core::registry::DirectoryError>(())
//! ```
//!
//! ## Architecture
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`registry`] | Users, the group tree, and the `Directory` aggregate root |
//! | [`notify`] | `PostSink` subscriptions, delivered synchronously on post |
//! | [`panel`] | Selection-driven facade for a presentation layer |
//! | [`analytics`] | Word counts and positive-entry scoring over feeds |
//!
//! ## Concurrency
//!
//! Single-writer by construction: every mutation goes through
//! `&mut Directory`, and sink delivery happens on the poster's thread. A
//! concurrent embedding must put the Directory behind one lock or
//! mailbox, because compound operations (duplicate-check-then-insert,
//! containment-check-then-attach) are critical sections.

#![allow(clippy::empty_line_after_doc_comments)]

// ── Public modules ──────────────────────────────────────────────────────────

/// Feed statistics: word counts and positive-entry scoring.
pub mod analytics;

/// Post notification channel: sinks, subscriptions, delivery contract.
pub mod notify;

/// Presentation-boundary facade with tree selection state.
pub mod panel;

/// Users, groups, and the Directory aggregate root.
pub mod registry;

// ── Re-exports for convenience ──────────────────────────────────────────────

pub use analytics::{positive_entries, positive_percentage, total_words, FeedScorer, Scoring};
pub use notify::{PostSink, SinkId, Subscription};
pub use panel::{ControlPanel, NodeRef};
pub use registry::{
    Directory, DirectoryError, FeedEntry, Group, GroupHandle, GroupId, User, UserHandle, UserId,
    ROOT_GROUP_ID,
};

// ── Library metadata ────────────────────────────────────────────────────────

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version() -> &'static str {
    VERSION
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
        assert!(version().contains('.'));
    }

    #[test]
    fn test_end_to_end_smoke() {
        let mut panel = ControlPanel::new();
        let team_a = panel.add_group("teamA").unwrap();

        panel.select(NodeRef::Group(team_a));
        let alice = panel.add_user("alice").unwrap();
        let bob = panel.add_user("bob").unwrap();

        let dir = panel.directory_mut();
        dir.follow(bob, alice).unwrap();
        dir.post(alice, "what a great day").unwrap();
        dir.post(bob, "meh").unwrap();

        assert_eq!(dir.total_users(), 2);
        assert_eq!(dir.total_groups(), 1);
        assert_eq!(dir.total_posts(), 2);

        // 1 positive entry over 5 words.
        let pct = positive_percentage(dir.users(), Scoring::default());
        assert!((pct - 20.0).abs() < 1e-9);
    }
}
