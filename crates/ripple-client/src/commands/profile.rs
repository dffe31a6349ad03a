use ripple_backend::Platform;
use ripple_shared::{Identity, RippleError};

use crate::state::AppContext;

/// Replace the current user's photo and refresh the session with the
/// updated identity. Remote sources are reused as-is; local ones are
/// uploaded first.
pub async fn update_photo<P: Platform>(
    ctx: &AppContext<P>,
    photo_source: &str,
) -> Result<Identity, RippleError> {
    let _busy = ctx.busy.start();
    let identity = ctx.gateway.update_user_photo(photo_source).await?;
    ctx.session.set(identity.clone());
    Ok(identity)
}
