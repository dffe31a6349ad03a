//! Domain model structs exchanged with the backend platform.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the platform's document API and back to the UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, MessageId, UserId};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The authenticated user's resolved profile record.
///
/// An `Identity` is either fully absent (unauthenticated) or fully
/// populated: `uid` and `email` are always non-empty when one is produced
/// by a successful signup or login. `name` may be unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Platform-assigned user identifier.
    pub uid: UserId,
    /// Display name, if the user has set one.
    pub name: Option<String>,
    /// The email the account was registered with.
    pub email: String,
    /// Resolvable remote address of the profile photo.
    pub photo_url: String,
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// A named conversation thread container.
///
/// The id is both the document key and a denormalized field of the record.
/// Channels are immutable after creation and listed by `created_at`
/// descending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Platform-assigned unique identifier.
    pub id: ChannelId,
    /// Channel title (non-empty, at most 20 characters).
    pub title: String,
    /// Channel description (at most 40 characters).
    pub description: String,
    /// Creation time, stamped by the platform at call time.
    /// Carried on the wire as integer milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single timestamped chat entry scoped to one channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Client-assigned identifier, unique within the channel. Used as the
    /// storage key, so re-sending the same id overwrites. Named `_id` on
    /// the wire.
    #[serde(rename = "_id")]
    pub id: MessageId,
    /// The channel this message belongs to.
    pub channel_id: ChannelId,
    /// Sender attribution, resolved from the session at send time.
    pub sender_id: UserId,
    /// Sender display name, if set.
    pub sender_name: Option<String>,
    /// Sender profile photo address.
    pub sender_photo_url: String,
    /// Message body.
    pub text: String,
    /// Server-call-time timestamp, not client-send-time.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}
