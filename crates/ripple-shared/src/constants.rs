use crate::types::UserId;

/// Application name
pub const APP_NAME: &str = "Ripple";

/// Photo sources that already start with this prefix are resolvable remote
/// addresses and must not be re-uploaded.
pub const REMOTE_URL_PREFIX: &str = "https";

/// Maximum channel title length, in characters.
pub const MAX_CHANNEL_TITLE_CHARS: usize = 20;

/// Maximum channel description length, in characters.
pub const MAX_CHANNEL_DESCRIPTION_CHARS: usize = 40;

/// Minimum accepted password length.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Storage path for a user's profile photo. One fixed path per user, so a
/// re-upload overwrites the previous photo.
pub fn profile_photo_path(uid: &UserId) -> String {
    format!("/profile/{uid}/photo.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_path_is_per_user() {
        let path = profile_photo_path(&UserId("abc".into()));
        assert_eq!(path, "/profile/abc/photo.png");
    }
}
