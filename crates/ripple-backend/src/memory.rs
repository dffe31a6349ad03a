//! In-process [`Platform`] implementation.
//!
//! Mirrors the hosted platform's emulator: accounts, documents, and files
//! live in memory for the process lifetime, and collection watches publish
//! full snapshots over `watch` channels. Used directly by tests and by
//! offline development builds.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use ripple_shared::constants::MIN_PASSWORD_CHARS;
use ripple_shared::{AuthError, Channel, ChannelId, Identity, Message, StorageError, UserId, WriteError};

use crate::feed::LiveFeed;
use crate::platform::{NewMessage, Platform};

/// Base address reported for uploaded files.
const FILE_URL_BASE: &str = "https://files.ripple.dev/v0";

struct Account {
    uid: UserId,
    email: String,
    password_hash: [u8; 32],
    name: Option<String>,
    photo_url: String,
}

impl Account {
    fn identity(&self) -> Identity {
        Identity {
            uid: self.uid.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

#[derive(Default)]
struct State {
    /// Accounts keyed by email.
    accounts: HashMap<String, Account>,
    /// Uid of the signed-in account, if any.
    session: Option<UserId>,
    /// Channels, kept ordered by `created_at` descending.
    channels: Vec<Channel>,
    /// Messages per channel, each list ordered by `created_at` descending.
    messages: HashMap<ChannelId, Vec<Message>>,
    /// Uploaded files keyed by storage path.
    files: HashMap<String, Vec<u8>>,
}

/// In-memory backend platform.
pub struct MemoryPlatform {
    state: Mutex<State>,
    channels_tx: watch::Sender<Vec<Channel>>,
    message_feeds: Mutex<HashMap<ChannelId, watch::Sender<Vec<Message>>>>,
    uploads: AtomicUsize,
    channel_feed_regs: AtomicUsize,
    message_feed_regs: AtomicUsize,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        let (channels_tx, _) = watch::channel(Vec::new());
        Self {
            state: Mutex::new(State::default()),
            channels_tx,
            message_feeds: Mutex::new(HashMap::new()),
            uploads: AtomicUsize::new(0),
            channel_feed_regs: AtomicUsize::new(0),
            message_feed_regs: AtomicUsize::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn feeds(&self) -> MutexGuard<'_, HashMap<ChannelId, watch::Sender<Vec<Message>>>> {
        match self.message_feeds.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    // -- introspection ------------------------------------------------------

    /// Number of files written so far.
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Cumulative channel-watch registrations.
    pub fn channel_feed_registrations(&self) -> usize {
        self.channel_feed_regs.load(Ordering::SeqCst)
    }

    /// Channel-watch registrations still attached.
    pub fn active_channel_feeds(&self) -> usize {
        self.channels_tx.receiver_count()
    }

    /// Cumulative message-watch registrations, all channels.
    pub fn message_feed_registrations(&self) -> usize {
        self.message_feed_regs.load(Ordering::SeqCst)
    }

    /// Message-watch registrations still attached for one channel.
    pub fn active_message_feeds(&self, channel_id: &ChannelId) -> usize {
        self.feeds()
            .get(channel_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

fn password_hash(password: &str) -> [u8; 32] {
    *blake3::hash(password.as_bytes()).as_bytes()
}

impl Platform for MemoryPlatform {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_CHARS,
            });
        }

        let mut state = self.state();
        if state.accounts.contains_key(email) {
            return Err(AuthError::EmailInUse);
        }

        let account = Account {
            uid: UserId(Uuid::new_v4().to_string()),
            email: email.to_string(),
            password_hash: password_hash(password),
            name: None,
            photo_url: String::new(),
        };
        let identity = account.identity();

        state.session = Some(account.uid.clone());
        state.accounts.insert(email.to_string(), account);

        debug!(uid = %identity.uid, "account created");
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let mut state = self.state();
        let identity = match state.accounts.get(email) {
            Some(account) if account.password_hash == password_hash(password) => {
                account.identity()
            }
            _ => return Err(AuthError::InvalidCredentials),
        };
        state.session = Some(identity.uid.clone());
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.state().session = None;
        Ok(())
    }

    async fn update_profile(
        &self,
        name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<Identity, AuthError> {
        let mut state = self.state();
        let uid = state.session.clone().ok_or(AuthError::NotAuthenticated)?;
        let account = state
            .accounts
            .values_mut()
            .find(|a| a.uid == uid)
            .ok_or(AuthError::NotAuthenticated)?;

        if let Some(name) = name {
            account.name = Some(name.to_string());
        }
        if let Some(photo_url) = photo_url {
            account.photo_url = photo_url.to_string();
        }
        Ok(account.identity())
    }

    fn cached_identity(&self) -> Option<Identity> {
        let state = self.state();
        let uid = state.session.as_ref()?;
        state
            .accounts
            .values()
            .find(|a| &a.uid == uid)
            .map(Account::identity)
    }

    async fn put_file(&self, path: &str, data: Vec<u8>) -> Result<String, StorageError> {
        if data.is_empty() {
            return Err(StorageError::Write("empty file".to_string()));
        }
        let size = data.len();
        self.state().files.insert(path.to_string(), data);
        self.uploads.fetch_add(1, Ordering::SeqCst);
        debug!(path, size, "file stored");
        Ok(format!("{FILE_URL_BASE}{path}?alt=media"))
    }

    async fn insert_channel(&self, title: &str, description: &str) -> Result<Channel, WriteError> {
        let channel = Channel {
            id: ChannelId::new(),
            title: title.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        };

        let mut state = self.state();
        // Insert at the front, then stable-sort: equal timestamps keep the
        // newest creation first.
        state.channels.insert(0, channel.clone());
        state.channels.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.channels_tx.send_replace(state.channels.clone());

        debug!(id = %channel.id, "channel created");
        Ok(channel)
    }

    async fn upsert_message(
        &self,
        channel_id: &ChannelId,
        draft: NewMessage,
    ) -> Result<Message, WriteError> {
        let mut state = self.state();
        if !state.channels.iter().any(|c| &c.id == channel_id) {
            return Err(WriteError::ChannelNotFound(channel_id.clone()));
        }

        let message = Message {
            id: draft.id,
            channel_id: channel_id.clone(),
            sender_id: draft.sender_id,
            sender_name: draft.sender_name,
            sender_photo_url: draft.sender_photo_url,
            text: draft.text,
            created_at: Utc::now(),
        };

        let list = state.messages.entry(channel_id.clone()).or_default();
        match list.iter_mut().find(|m| m.id == message.id) {
            Some(existing) => *existing = message.clone(),
            None => list.insert(0, message.clone()),
        }
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let snapshot = list.clone();
        drop(state);

        if let Some(tx) = self.feeds().get(channel_id) {
            tx.send_replace(snapshot);
        }

        debug!(id = %message.id, channel = %channel_id, "message stored");
        Ok(message)
    }

    fn watch_channels(&self) -> LiveFeed<Channel> {
        self.channel_feed_regs.fetch_add(1, Ordering::SeqCst);
        LiveFeed::new(self.channels_tx.subscribe())
    }

    fn watch_messages(&self, channel_id: &ChannelId) -> LiveFeed<Message> {
        let state = self.state();
        let current = state.messages.get(channel_id).cloned().unwrap_or_default();
        let mut feeds = self.feeds();
        let tx = feeds
            .entry(channel_id.clone())
            .or_insert_with(|| watch::channel(current).0);
        self.message_feed_regs.fetch_add(1, Ordering::SeqCst);
        LiveFeed::new(tx.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let platform = MemoryPlatform::new();
        platform.create_account("a@b.c", "secret1").await.unwrap();
        let err = platform.create_account("a@b.c", "secret2").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailInUse));
    }

    #[tokio::test]
    async fn weak_password_rejected() {
        let platform = MemoryPlatform::new();
        let err = platform.create_account("a@b.c", "short").await.unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword { .. }));
    }

    #[tokio::test]
    async fn wrong_password_rejected() {
        let platform = MemoryPlatform::new();
        platform.create_account("a@b.c", "secret1").await.unwrap();
        let err = platform.sign_in("a@b.c", "wrong-1").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn sign_out_is_idempotent() {
        let platform = MemoryPlatform::new();
        platform.create_account("a@b.c", "secret1").await.unwrap();
        platform.sign_out().await.unwrap();
        platform.sign_out().await.unwrap();
        assert!(platform.cached_identity().is_none());
    }

    #[tokio::test]
    async fn session_survives_profile_update() {
        let platform = MemoryPlatform::new();
        platform.create_account("a@b.c", "secret1").await.unwrap();
        let identity = platform
            .update_profile(Some("Ada"), Some("https://x/p.png"))
            .await
            .unwrap();
        assert_eq!(identity.name.as_deref(), Some("Ada"));
        assert_eq!(platform.cached_identity().unwrap(), identity);
    }

    #[tokio::test]
    async fn message_to_missing_channel_rejected() {
        let platform = MemoryPlatform::new();
        let draft = NewMessage {
            id: ripple_shared::MessageId("m1".into()),
            sender_id: UserId("u1".into()),
            sender_name: None,
            sender_photo_url: String::new(),
            text: "hi".into(),
        };
        let err = platform
            .upsert_message(&ChannelId::new(), draft)
            .await
            .unwrap_err();
        assert!(matches!(err, WriteError::ChannelNotFound(_)));
    }

    #[tokio::test]
    async fn feed_registrations_are_counted() {
        let platform = MemoryPlatform::new();
        let f1 = platform.watch_channels();
        assert_eq!(platform.active_channel_feeds(), 1);
        f1.cancel();
        assert_eq!(platform.active_channel_feeds(), 0);

        let f2 = platform.watch_channels();
        assert_eq!(platform.channel_feed_registrations(), 2);
        assert_eq!(platform.active_channel_feeds(), 1);
        drop(f2);
        assert_eq!(platform.active_channel_feeds(), 0);
    }
}
