//! Adapter between a gateway live feed and a screen's local list.
//!
//! A `Binding` is created attached (the one subscribe, at mount) and
//! consumed to detach (the one unsubscribe, at unmount). Re-subscribing
//! after detach requires a fresh instance; the pairing is enforced by the
//! type, not by convention. Skipping the detach on re-mount is what caused
//! duplicated data in the app this layer replaces.
//!
//! Every received snapshot overwrites the held list in its entirety; there
//! is no merge or patch logic.

use ripple_backend::LiveFeed;

pub struct Binding<T> {
    feed: LiveFeed<T>,
    items: Vec<T>,
}

impl<T: Clone> Binding<T> {
    /// Register with the feed. The single subscribe of this instance.
    pub fn attach(feed: LiveFeed<T>) -> Self {
        Self {
            feed,
            items: Vec::new(),
        }
    }

    /// Wait for the next snapshot and replace the held list with it.
    /// The first call yields the feed's current state. Returns `false`
    /// once the feed has ended.
    pub async fn refresh(&mut self) -> bool {
        match self.feed.recv().await {
            Some(snapshot) => {
                self.items = snapshot;
                true
            }
            None => false,
        }
    }

    /// The list as of the last refresh.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Cancel the feed registration. Consuming `self` makes a second
    /// unsubscribe, or a use-after-unsubscribe, impossible.
    pub fn detach(self) {}
}
