use tracing::debug;

use ripple_backend::{Platform, SignUpRequest};
use ripple_shared::{Identity, RippleError};

use crate::state::AppContext;

/// Create an account and open the session. A signup without a chosen photo
/// falls back to the configured default photo address, which is already
/// remote and therefore never re-uploaded.
pub async fn sign_up<P: Platform>(
    ctx: &AppContext<P>,
    mut request: SignUpRequest,
) -> Result<Identity, RippleError> {
    let _busy = ctx.busy.start();
    if request.photo_source.is_empty() {
        request.photo_source = ctx.config.default_photo_url.clone();
    }
    let identity = ctx.gateway.sign_up(request).await?;
    ctx.session.set(identity.clone());
    Ok(identity)
}

pub async fn login<P: Platform>(
    ctx: &AppContext<P>,
    email: &str,
    password: &str,
) -> Result<Identity, RippleError> {
    let _busy = ctx.busy.start();
    let identity = ctx.gateway.login(email, password).await?;
    ctx.session.set(identity.clone());
    Ok(identity)
}

pub async fn logout<P: Platform>(ctx: &AppContext<P>) -> Result<(), RippleError> {
    let _busy = ctx.busy.start();
    ctx.gateway.logout().await?;
    ctx.session.clear();
    Ok(())
}

/// Seed the session from the platform's cached session at app start.
/// Returns whether a session was resumed.
pub fn resume<P: Platform>(ctx: &AppContext<P>) -> bool {
    match ctx.gateway.current_user() {
        Some(identity) => {
            debug!(uid = %identity.uid, "session resumed");
            ctx.session.set(identity);
            true
        }
        None => false,
    }
}
