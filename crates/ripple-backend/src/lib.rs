pub mod feed;
pub mod gateway;
pub mod memory;
pub mod platform;
pub mod rest;

pub use feed::LiveFeed;
pub use gateway::{Gateway, MessageDraft, SignUpRequest};
pub use memory::MemoryPlatform;
pub use platform::{NewMessage, Platform};
pub use rest::RestPlatform;
