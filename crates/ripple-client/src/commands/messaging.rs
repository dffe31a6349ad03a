use ripple_backend::{MessageDraft, Platform};
use ripple_shared::{ChannelId, Message, RippleError};

use crate::binding::Binding;
use crate::state::AppContext;

/// Send one message. No busy guard here: the chat screen stays interactive
/// while a send is in flight, matching the send affordance of the UI.
pub async fn send_message<P: Platform>(
    ctx: &AppContext<P>,
    channel_id: &ChannelId,
    draft: MessageDraft,
) -> Result<(), RippleError> {
    ctx.gateway.create_message(channel_id, draft).await
}

/// Mount-time registration for one channel's message list. Detach the
/// binding at unmount.
pub fn subscribe<P: Platform>(ctx: &AppContext<P>, channel_id: &ChannelId) -> Binding<Message> {
    Binding::attach(ctx.gateway.subscribe_messages(channel_id))
}

/// Feeds arrive newest-first; chat rendering wants oldest-first.
pub fn chronological(messages: &[Message]) -> Vec<Message> {
    messages.iter().rev().cloned().collect()
}
