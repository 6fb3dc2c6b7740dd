//! Session key fingerprinting for operational visibility.
//!
//! A truncated SHA-256 digest of the signing half of the key lets operators
//! confirm which key a running instance uses without the key ever reaching
//! the logs.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Lowercase hex encoding of the first 8 bytes of `SHA-256(key.signing())`.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use recipe_service::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
