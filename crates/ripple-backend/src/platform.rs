//! The boundary between this application and the external auth/document/file
//! platform.
//!
//! Everything the backend-as-a-service SDK does for us is expressed here as
//! one trait, so the [`Gateway`](crate::gateway::Gateway) and the client
//! layer stay independent of the concrete transport. Two implementations
//! exist: [`MemoryPlatform`](crate::memory::MemoryPlatform) (in-process,
//! emulator semantics, used by tests) and
//! [`RestPlatform`](crate::rest::RestPlatform) (reqwest against the hosted
//! service).

use serde::{Deserialize, Serialize};

use ripple_shared::{AuthError, Channel, ChannelId, Identity, Message, MessageId, StorageError, UserId, WriteError};

use crate::feed::LiveFeed;

/// A message document as handed to the platform: everything except the
/// creation timestamp, which the platform stamps at write time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    #[serde(rename = "_id")]
    pub id: MessageId,
    pub sender_id: UserId,
    pub sender_name: Option<String>,
    pub sender_photo_url: String,
    pub text: String,
}

/// External platform surface: auth sessions, document writes, file puts,
/// and push-driven collection watches.
///
/// All async operations are non-blocking from the caller's perspective;
/// failures are surfaced to the caller with no retry at this layer.
#[allow(async_fn_in_trait)]
pub trait Platform: Send + Sync {
    /// Create an account and open a session for it.
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Authenticate and open a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Close the current session. Idempotent.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Update the current account's display name and/or photo address.
    /// Fields passed as `None` are left unchanged.
    async fn update_profile(
        &self,
        name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<Identity, AuthError>;

    /// Synchronous read of the cached session, if any.
    fn cached_identity(&self) -> Option<Identity>;

    /// Write a file at `path` and return its publicly resolvable address.
    /// Writing the same path again overwrites.
    async fn put_file(&self, path: &str, data: Vec<u8>) -> Result<String, StorageError>;

    /// Create a channel document. The platform assigns the id, stores it as
    /// a field of the record as well, and stamps `created_at` at call time.
    async fn insert_channel(&self, title: &str, description: &str) -> Result<Channel, WriteError>;

    /// Write a message document keyed by its own id under the channel.
    /// Same-id writes replace. Stamps `created_at` at call time.
    async fn upsert_message(
        &self,
        channel_id: &ChannelId,
        draft: NewMessage,
    ) -> Result<Message, WriteError>;

    /// Watch the channel collection, ordered by creation time descending.
    fn watch_channels(&self) -> LiveFeed<Channel>;

    /// Watch one channel's messages, ordered by creation time descending.
    fn watch_messages(&self, channel_id: &ChannelId) -> LiveFeed<Message>;
}
