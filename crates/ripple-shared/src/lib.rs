pub mod constants;
pub mod error;
pub mod models;
pub mod types;

pub use error::{AuthError, PermissionError, RippleError, StorageError, WriteError};
pub use models::{Channel, Identity, Message};
pub use types::{ChannelId, MessageId, UserId};
