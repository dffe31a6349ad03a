//! Cancellable live feeds over collection snapshots.
//!
//! A [`LiveFeed`] is the push half of a collection watch: every emission is
//! the full current ordered list, never a delta. Snapshots are delivered
//! serially over a `tokio::sync::watch` channel, so consumers need no extra
//! locking. Dropping (or [`LiveFeed::cancel`]-ing) the feed detaches the
//! registration without side effects, before any subsequent emission.

use tokio::sync::watch;

/// A push-driven, replace-on-emission sequence of a collection's state.
pub struct LiveFeed<T> {
    rx: watch::Receiver<Vec<T>>,
    primed: bool,
}

impl<T: Clone> LiveFeed<T> {
    pub(crate) fn new(rx: watch::Receiver<Vec<T>>) -> Self {
        Self { rx, primed: false }
    }

    /// Feed whose current snapshot is still being produced when it is
    /// handed out. The first `recv` waits for the publisher's first
    /// emission instead of returning the placeholder the channel was
    /// seeded with.
    pub(crate) fn deferred(rx: watch::Receiver<Vec<T>>) -> Self {
        Self { rx, primed: true }
    }

    /// Wait for the next snapshot.
    ///
    /// The first call yields the collection's current state; subsequent
    /// calls wait for a change. Returns `None` once the publishing side
    /// has gone away.
    pub async fn recv(&mut self) -> Option<Vec<T>> {
        if !self.primed {
            self.primed = true;
            return Some(self.rx.borrow_and_update().clone());
        }
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }

    /// Detach from the feed. Equivalent to dropping it.
    pub fn cancel(self) {}
}
