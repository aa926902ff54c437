/// Post notification channel — the observer seam between a user and any
/// number of subscribed views.
///
/// A `PostSink` is a capability the presentation layer hands to the core.
/// Delivery is synchronous: a sink that blocks stalls the poster. Sinks
/// are invoked in registration order, and registering the same logical
/// sink twice yields two deliveries per post (registration is a plain
/// append, not an idempotent add).

use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// SinkId
// ---------------------------------------------------------------------------

/// Opaque token identifying one subscription on one user.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(Uuid);

impl SinkId {
    pub(crate) fn fresh() -> Self {
        SinkId(Uuid::new_v4())
    }
}

impl fmt::Debug for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SinkId({})", &self.0.simple().to_string()[..8])
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PostSink
// ---------------------------------------------------------------------------

/// Callback invoked once per post with the posted text, verbatim.
pub trait PostSink {
    fn on_post(&mut self, post: &str);
}

/// Any `FnMut(&str)` closure is a sink.
impl<F: FnMut(&str)> PostSink for F {
    fn on_post(&mut self, post: &str) {
        self(post)
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// One registered sink, owned by the user it observes. Cleared only when
/// the user is destroyed or the subscription is explicitly dropped.
pub struct Subscription {
    pub(crate) id: SinkId,
    pub(crate) sink: Box<dyn PostSink>,
}

impl Subscription {
    pub fn id(&self) -> SinkId {
        self.id
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscription({:?})", self.id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_sink_ids_are_unique() {
        let a = SinkId::fresh();
        let b = SinkId::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn test_closure_is_a_sink() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let inner = Rc::clone(&seen);
        let mut sink: Box<dyn PostSink> = Box::new(move |post: &str| {
            inner.borrow_mut().push(post.to_string());
        });

        sink.on_post("hello");
        sink.on_post("world");
        assert_eq!(*seen.borrow(), vec!["hello", "world"]);
    }
}
