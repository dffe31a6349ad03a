//! Static client configuration: baked remote asset addresses.
//!
//! Download addresses handed out by the file store may carry a `token`
//! query parameter issued to the viewer that fetched them. Tokens are
//! per-viewer and short-lived, and the login screen must be able to show
//! these assets before anyone is signed in, so the token is stripped before
//! an address is baked in or persisted.

use url::Url;

/// Logo shown on the auth screens.
pub const DEFAULT_LOGO_URL: &str = "https://files.ripple.dev/v0/assets/logo.png?alt=media";

/// Profile photo used when the user signs up without picking one.
pub const DEFAULT_PHOTO_URL: &str = "https://files.ripple.dev/v0/assets/photo.png?alt=media";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub logo_url: String,
    pub default_photo_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            logo_url: strip_access_token(DEFAULT_LOGO_URL),
            default_photo_url: strip_access_token(DEFAULT_PHOTO_URL),
        }
    }
}

/// Remove any `token` query parameter, keeping the rest of the query
/// intact. Addresses that do not parse as URLs are returned unchanged.
pub fn strip_access_token(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_string();
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "token")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_stripped_and_rest_kept() {
        let stripped =
            strip_access_token("https://files.ripple.dev/v0/p.png?alt=media&token=abc123");
        assert_eq!(stripped, "https://files.ripple.dev/v0/p.png?alt=media");
    }

    #[test]
    fn token_only_query_is_removed_entirely() {
        let stripped = strip_access_token("https://files.ripple.dev/v0/p.png?token=abc123");
        assert_eq!(stripped, "https://files.ripple.dev/v0/p.png");
    }

    #[test]
    fn tokenless_address_is_unchanged() {
        let addr = "https://files.ripple.dev/v0/p.png?alt=media";
        assert_eq!(strip_access_token(addr), addr);
    }

    #[test]
    fn defaults_are_token_free() {
        let config = ClientConfig::default();
        assert!(!config.logo_url.contains("token="));
        assert!(!config.default_photo_url.contains("token="));
    }
}
