//! Client command layer: one module per screen family.
//!
//! Commands pair busy-flag acquisition with the gateway call they wrap and
//! apply the result to the session store. Errors propagate to the caller
//! for user-visible presentation; the busy guard releases either way.

pub mod auth;
pub mod channels;
pub mod messaging;
pub mod profile;
