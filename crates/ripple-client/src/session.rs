//! Holder for the authenticated identity.
//!
//! The store is a pure state container: no validation happens here, that is
//! the gateway's job. Mutations go through a `watch` channel so the
//! navigation chooser re-evaluates on every change.

use tokio::sync::watch;

use ripple_shared::Identity;

pub struct SessionStore {
    tx: watch::Sender<Option<Identity>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// Current identity, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.tx.borrow().clone()
    }

    /// Replace any prior identity.
    pub fn set(&self, identity: Identity) {
        self.tx.send_replace(Some(identity));
    }

    /// Drop the identity (logout / teardown).
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// Whether routing should land on the authenticated flow: requires a
    /// present identity with non-empty uid and email.
    pub fn is_authenticated(&self) -> bool {
        self.tx
            .borrow()
            .as_ref()
            .is_some_and(|id| !id.uid.is_empty() && !id.email.is_empty())
    }

    /// Observe session mutations.
    pub fn watch(&self) -> watch::Receiver<Option<Identity>> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
