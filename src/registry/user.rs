/// User entity — identity, follow links, an append-only feed, and the
/// subscriber sinks notified synchronously on every post.
///
/// Invariant: the feed only grows during the user's lifetime; there is no
/// deletion operation. Follow links are weak arena handles, never owning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::notify::{PostSink, SinkId, Subscription};
use crate::registry::ids::{UserHandle, UserId};

// ---------------------------------------------------------------------------
// FeedEntry
// ---------------------------------------------------------------------------

/// One posted entry: the text plus the wall-clock time it was posted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

pub struct User {
    pub(crate) id: UserId,
    pub(crate) created_at: DateTime<Utc>,
    /// Who follows this user. Weak back-references, not authoritative.
    pub(crate) followers: Vec<UserHandle>,
    /// Who this user follows.
    pub(crate) following: Vec<UserHandle>,
    /// Append-only, insertion order preserved.
    pub(crate) feed: Vec<FeedEntry>,
    /// Owned sinks, notified in registration order.
    pub(crate) subscribers: Vec<Subscription>,
}

impl User {
    pub fn new(id: impl Into<UserId>) -> Self {
        User {
            id: id.into(),
            created_at: Utc::now(),
            followers: Vec::new(),
            following: Vec::new(),
            feed: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn followers(&self) -> &[UserHandle] {
        &self.followers
    }

    pub fn following(&self) -> &[UserHandle] {
        &self.following
    }

    pub fn feed(&self) -> &[FeedEntry] {
        &self.feed
    }

    /// The feed as bare text, in post order.
    pub fn feed_texts(&self) -> impl Iterator<Item = &str> {
        self.feed.iter().map(|entry| entry.text.as_str())
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Append to the feed, then deliver the text verbatim to every
    /// subscriber, in registration order, before returning. Delivery is
    /// never deferred or batched; a blocking sink stalls the poster.
    pub fn post(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.feed.push(FeedEntry {
            text: text.clone(),
            posted_at: Utc::now(),
        });
        for sub in &mut self.subscribers {
            sub.sink.on_post(&text);
        }
    }

    /// Register a sink. Not idempotent: the same logical sink registered
    /// twice receives two deliveries per post.
    pub fn subscribe(&mut self, sink: Box<dyn PostSink>) -> SinkId {
        let id = SinkId::fresh();
        self.subscribers.push(Subscription { id, sink });
        id
    }

    /// Drop the subscription with the given id. Returns whether one was
    /// found. Already-delivered posts are unaffected.
    pub fn unsubscribe(&mut self, id: SinkId) -> bool {
        match self.subscribers.iter().position(|sub| sub.id == id) {
            Some(idx) => {
                self.subscribers.remove(idx);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("followers", &self.followers.len())
            .field("following", &self.following.len())
            .field("feed", &self.feed.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
