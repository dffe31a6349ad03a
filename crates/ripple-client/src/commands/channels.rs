use ripple_backend::Platform;
use ripple_shared::{Channel, ChannelId, RippleError};

use crate::binding::Binding;
use crate::state::AppContext;

/// Create a channel, blocking the UI for the duration.
pub async fn create_channel<P: Platform>(
    ctx: &AppContext<P>,
    title: &str,
    description: &str,
) -> Result<ChannelId, RippleError> {
    let _busy = ctx.busy.start();
    ctx.gateway.create_channel(title, description).await
}

/// Mount-time registration for the channel list screen. Detach the binding
/// at unmount.
pub fn subscribe<P: Platform>(ctx: &AppContext<P>) -> Binding<Channel> {
    Binding::attach(ctx.gateway.subscribe_channels())
}
