use thiserror::Error;

use crate::types::ChannelId;

#[derive(Error, Debug)]
pub enum RippleError {
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    #[error("Permission error: {0}")]
    Permission(#[from] PermissionError),
}

/// Failures of the authentication platform.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("An account already exists for this email")]
    EmailInUse,

    #[error("Password too weak: must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No authenticated session")]
    NotAuthenticated,

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures reading or writing the file store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read image source: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to write file: {0}")]
    Write(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Document create/update rejections.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),

    #[error("Channel title must not be empty")]
    EmptyTitle,

    #[error("Channel title exceeds {max} characters")]
    TitleTooLong { max: usize },

    #[error("Channel description exceeds {max} characters")]
    DescriptionTooLong { max: usize },

    #[error("Message text must not be empty")]
    EmptyMessage,

    #[error("Write rejected: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Device-capability denials (e.g. photo library access).
#[derive(Error, Debug)]
pub enum PermissionError {
    #[error("Access to the photo source was denied")]
    PhotoAccessDenied,
}
