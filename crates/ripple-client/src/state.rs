//! Application context shared across all client commands.
//!
//! Session and busy state are process-wide for the application's running
//! lifetime: created at app start, reset on logout or teardown, never
//! reached through ambient globals.

use ripple_backend::{Gateway, Platform};

use crate::busy::BusyFlag;
use crate::config::ClientConfig;
use crate::session::SessionStore;

/// Central client context, injected into every command.
pub struct AppContext<P: Platform> {
    /// The sole boundary to the backend platform.
    pub gateway: Gateway<P>,
    /// Authenticated identity, if any. Gates routing.
    pub session: SessionStore,
    /// In-flight-operation flag. Gates duplicate submissions.
    pub busy: BusyFlag,
    /// Baked asset addresses.
    pub config: ClientConfig,
}

impl<P: Platform> AppContext<P> {
    pub fn new(platform: P) -> Self {
        Self {
            gateway: Gateway::new(platform),
            session: SessionStore::new(),
            busy: BusyFlag::new(),
            config: ClientConfig::default(),
        }
    }
}
