//! The sole boundary between the application and the backend platform.
//!
//! The [`Gateway`] owns a [`Platform`] implementation and layers the
//! application's contracts on top of it: photo-source resolution before
//! profile writes, channel field validation, sender attribution from the
//! cached session, and the live-feed subscriptions the screens consume.
//! Every failure is surfaced to the caller; nothing is retried here.

use std::path::Path;

use tokio::fs;
use tracing::info;

use ripple_shared::constants::{
    profile_photo_path, MAX_CHANNEL_DESCRIPTION_CHARS, MAX_CHANNEL_TITLE_CHARS, REMOTE_URL_PREFIX,
};
use ripple_shared::{
    AuthError, Channel, ChannelId, Identity, Message, MessageId, PermissionError, RippleError,
    StorageError, WriteError,
};

use crate::feed::LiveFeed;
use crate::platform::{NewMessage, Platform};

/// Everything needed to create an account.
///
/// `photo_source` is either an already-resolvable remote address (starts
/// with `"https"`) or a local file path to upload first.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub photo_source: String,
}

/// A message as composed by the UI: client-assigned id plus text. Sender
/// attribution and the timestamp are filled in on the way to the platform.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub id: MessageId,
    pub text: String,
}

pub struct Gateway<P> {
    platform: P,
}

impl<P: Platform> Gateway<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Direct access to the underlying platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    // -- auth ---------------------------------------------------------------

    /// Create an account with name and photo attached. The returned
    /// [`Identity`] is fully populated; on any failure nothing partial is
    /// exposed.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<Identity, RippleError> {
        let SignUpRequest {
            email,
            password,
            name,
            photo_source,
        } = request;

        self.platform.create_account(&email, &password).await?;
        let photo_url = self.resolve_photo_source(&photo_source).await?;
        let identity = self
            .platform
            .update_profile(Some(name.trim()), Some(&photo_url))
            .await?;

        info!(uid = %identity.uid, "account created");
        Ok(identity)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, RippleError> {
        let identity = self.platform.sign_in(email, password).await?;
        info!(uid = %identity.uid, "signed in");
        Ok(identity)
    }

    /// Idempotent; fails only on transport failure.
    pub async fn logout(&self) -> Result<(), RippleError> {
        self.platform.sign_out().await?;
        info!("signed out");
        Ok(())
    }

    /// Synchronous read of the platform's cached session.
    pub fn current_user(&self) -> Option<Identity> {
        self.platform.cached_identity()
    }

    // -- files --------------------------------------------------------------

    /// Read a local image and store it at the user's fixed profile photo
    /// path, returning the resolvable address. Callers must not invoke this
    /// for sources that are already remote addresses.
    pub async fn upload_image(&self, source: &Path) -> Result<String, RippleError> {
        let identity = self
            .platform
            .cached_identity()
            .ok_or(AuthError::NotAuthenticated)?;

        let data = fs::read(source).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => {
                RippleError::Permission(PermissionError::PhotoAccessDenied)
            }
            _ => RippleError::Storage(StorageError::Read(e)),
        })?;

        let path = profile_photo_path(&identity.uid);
        let url = self.platform.put_file(&path, data).await?;
        info!(path, "profile photo uploaded");
        Ok(url)
    }

    /// Replace the current user's photo, uploading first when the source is
    /// not already remote.
    pub async fn update_user_photo(&self, photo_source: &str) -> Result<Identity, RippleError> {
        let photo_url = self.resolve_photo_source(photo_source).await?;
        let identity = self.platform.update_profile(None, Some(&photo_url)).await?;
        Ok(identity)
    }

    async fn resolve_photo_source(&self, source: &str) -> Result<String, RippleError> {
        if source.starts_with(REMOTE_URL_PREFIX) {
            Ok(source.to_string())
        } else {
            self.upload_image(Path::new(source)).await
        }
    }

    // -- documents ----------------------------------------------------------

    /// Validate and create a channel. The platform assigns the id and the
    /// creation timestamp.
    pub async fn create_channel(
        &self,
        title: &str,
        description: &str,
    ) -> Result<ChannelId, RippleError> {
        let title = title.trim();
        let description = description.trim();

        if title.is_empty() {
            return Err(WriteError::EmptyTitle.into());
        }
        if title.chars().count() > MAX_CHANNEL_TITLE_CHARS {
            return Err(WriteError::TitleTooLong {
                max: MAX_CHANNEL_TITLE_CHARS,
            }
            .into());
        }
        if description.chars().count() > MAX_CHANNEL_DESCRIPTION_CHARS {
            return Err(WriteError::DescriptionTooLong {
                max: MAX_CHANNEL_DESCRIPTION_CHARS,
            }
            .into());
        }

        let channel = self.platform.insert_channel(title, description).await?;
        info!(id = %channel.id, "channel created");
        Ok(channel.id)
    }

    /// Send a message. Sender attribution comes from the cached session;
    /// the platform stamps the timestamp at write time.
    pub async fn create_message(
        &self,
        channel_id: &ChannelId,
        draft: MessageDraft,
    ) -> Result<(), RippleError> {
        if draft.text.trim().is_empty() {
            return Err(WriteError::EmptyMessage.into());
        }
        let sender = self
            .platform
            .cached_identity()
            .ok_or(AuthError::NotAuthenticated)?;

        let message = NewMessage {
            id: draft.id,
            sender_id: sender.uid,
            sender_name: sender.name,
            sender_photo_url: sender.photo_url,
            text: draft.text,
        };
        self.platform.upsert_message(channel_id, message).await?;
        Ok(())
    }

    // -- live feeds ---------------------------------------------------------

    pub fn subscribe_channels(&self) -> LiveFeed<Channel> {
        self.platform.watch_channels()
    }

    pub fn subscribe_messages(&self, channel_id: &ChannelId) -> LiveFeed<Message> {
        self.platform.watch_messages(channel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPlatform;
    use chrono::Utc;

    const REMOTE_PHOTO: &str = "https://files.ripple.dev/v0/assets/photo.png?alt=media";

    async fn signed_up() -> Gateway<MemoryPlatform> {
        let gateway = Gateway::new(MemoryPlatform::new());
        gateway
            .sign_up(SignUpRequest {
                email: "ada@example.com".into(),
                password: "lovelace".into(),
                name: "Ada".into(),
                photo_source: REMOTE_PHOTO.into(),
            })
            .await
            .unwrap();
        gateway
    }

    #[tokio::test]
    async fn signup_with_remote_photo_skips_upload() {
        let gateway = signed_up().await;
        assert_eq!(gateway.platform().upload_count(), 0);

        let identity = gateway.current_user().unwrap();
        assert!(!identity.uid.is_empty());
        assert!(!identity.email.is_empty());
        assert_eq!(identity.name.as_deref(), Some("Ada"));
        assert_eq!(identity.photo_url, REMOTE_PHOTO);
    }

    #[tokio::test]
    async fn signup_uploads_local_photo() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("photo.png");
        std::fs::write(&photo, b"not-really-a-png").unwrap();

        let gateway = Gateway::new(MemoryPlatform::new());
        let identity = gateway
            .sign_up(SignUpRequest {
                email: "ada@example.com".into(),
                password: "lovelace".into(),
                name: "Ada".into(),
                photo_source: photo.to_string_lossy().into_owned(),
            })
            .await
            .unwrap();

        assert_eq!(gateway.platform().upload_count(), 1);
        let expected = format!("/profile/{}/photo.png", identity.uid);
        assert!(identity.photo_url.contains(&expected));
    }

    #[tokio::test]
    async fn upload_fails_without_session() {
        let gateway = Gateway::new(MemoryPlatform::new());
        let err = gateway
            .upload_image(Path::new("/nonexistent/photo.png"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RippleError::Auth(AuthError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn login_logout_round_trip() {
        let gateway = signed_up().await;
        gateway.logout().await.unwrap();
        assert!(gateway.current_user().is_none());

        let identity = gateway.login("ada@example.com", "lovelace").await.unwrap();
        assert_eq!(identity.email, "ada@example.com");
        assert!(gateway.current_user().is_some());

        let err = gateway.login("ada@example.com", "wrong-1").await.unwrap_err();
        assert!(matches!(
            err,
            RippleError::Auth(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn update_user_photo_replaces_remote_address() {
        let gateway = signed_up().await;
        let next = "https://files.ripple.dev/v0/assets/other.png";
        let identity = gateway.update_user_photo(next).await.unwrap();
        assert_eq!(identity.photo_url, next);
        assert_eq!(gateway.platform().upload_count(), 0);
    }

    #[tokio::test]
    async fn channel_creation_is_observable() {
        let gateway = signed_up().await;
        let mut feed = gateway.subscribe_channels();
        assert_eq!(feed.recv().await.unwrap(), vec![]);

        let before = Utc::now();
        let id = gateway.create_channel("General", "Talk").await.unwrap();
        let after = Utc::now();

        let list = feed.recv().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, id);
        assert_eq!(list[0].title, "General");
        assert_eq!(list[0].description, "Talk");
        assert!(list[0].created_at >= before && list[0].created_at <= after);
    }

    #[tokio::test]
    async fn channels_are_listed_newest_first() {
        let gateway = signed_up().await;
        gateway.create_channel("first", "").await.unwrap();
        gateway.create_channel("second", "").await.unwrap();
        gateway.create_channel("third", "").await.unwrap();

        let mut feed = gateway.subscribe_channels();
        let list = feed.recv().await.unwrap();
        let titles: Vec<&str> = list.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["third", "second", "first"]);
        assert!(list[0].created_at >= list[1].created_at);
        assert!(list[1].created_at >= list[2].created_at);
    }

    #[tokio::test]
    async fn channel_fields_are_validated() {
        let gateway = signed_up().await;

        let err = gateway.create_channel("   ", "").await.unwrap_err();
        assert!(matches!(err, RippleError::Write(WriteError::EmptyTitle)));

        let err = gateway
            .create_channel(&"x".repeat(21), "")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RippleError::Write(WriteError::TitleTooLong { max: 20 })
        ));

        let err = gateway
            .create_channel("ok", &"x".repeat(41))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RippleError::Write(WriteError::DescriptionTooLong { max: 40 })
        ));
    }

    #[tokio::test]
    async fn message_send_is_observable_without_duplicates() {
        let gateway = signed_up().await;
        let channel_id = gateway.create_channel("General", "").await.unwrap();

        gateway
            .create_message(
                &channel_id,
                MessageDraft {
                    id: MessageId("m1".into()),
                    text: "hi".into(),
                },
            )
            .await
            .unwrap();

        let mut feed = gateway.subscribe_messages(&channel_id);
        let list = feed.recv().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, MessageId("m1".into()));
        assert_eq!(list[0].text, "hi");
        assert_eq!(list[0].sender_name.as_deref(), Some("Ada"));
        feed.cancel();

        // A fresh subscription sees the same single record.
        let mut feed = gateway.subscribe_messages(&channel_id);
        assert_eq!(feed.recv().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn same_id_message_replaces() {
        let gateway = signed_up().await;
        let channel_id = gateway.create_channel("General", "").await.unwrap();

        for text in ["hi", "hi (edited)"] {
            gateway
                .create_message(
                    &channel_id,
                    MessageDraft {
                        id: MessageId("m1".into()),
                        text: text.into(),
                    },
                )
                .await
                .unwrap();
        }

        let mut feed = gateway.subscribe_messages(&channel_id);
        let list = feed.recv().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].text, "hi (edited)");
    }

    #[tokio::test]
    async fn message_requires_channel_and_session() {
        let gateway = signed_up().await;
        let err = gateway
            .create_message(
                &ChannelId::new(),
                MessageDraft {
                    id: MessageId("m1".into()),
                    text: "hi".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RippleError::Write(WriteError::ChannelNotFound(_))
        ));

        let channel_id = gateway.create_channel("General", "").await.unwrap();
        gateway.logout().await.unwrap();
        let err = gateway
            .create_message(
                &channel_id,
                MessageDraft {
                    id: MessageId("m2".into()),
                    text: "hi".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RippleError::Auth(AuthError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn empty_message_rejected() {
        let gateway = signed_up().await;
        let channel_id = gateway.create_channel("General", "").await.unwrap();
        let err = gateway
            .create_message(
                &channel_id,
                MessageDraft {
                    id: MessageId("m1".into()),
                    text: "  ".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RippleError::Write(WriteError::EmptyMessage)));
    }
}
