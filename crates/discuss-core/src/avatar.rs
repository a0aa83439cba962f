//! Gravatar urls for discussion participants

use crate::comment::User;
use sha2::{Digest, Sha256};

/// Build a Gravatar url for a user.
///
/// Gravatar accepts the SHA-256 of the trimmed, lowercased email. Users
/// without a known email hash their id instead, which still yields a
/// stable identicon.
pub fn gravatar_url(user: &User, size: u32, use_ssl: bool) -> String {
    let key = user
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_else(|| user.id.to_string());

    let hash = hex::encode(Sha256::digest(key.as_bytes()));
    let base = if use_ssl {
        "https://secure.gravatar.com"
    } else {
        "http://www.gravatar.com"
    };

    format!("{}/avatar/{}?d=identicon&s={}", base, hash, size)
}
