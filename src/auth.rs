//! Shared-secret API key check.
//!
//! Both values are hashed and the digests compared in constant time.

use sha2::{Digest, Sha256};

/// Name of the request header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Return `true` if the presented credential matches the configured secret.
///
/// A missing credential or an empty configured secret never matches.
pub fn verify_api_key(presented: Option<&str>, secret: &str) -> bool {
    let Some(presented) = presented else {
        return false;
    };
    if secret.is_empty() {
        return false;
    }

    let a = Sha256::digest(presented.as_bytes());
    let b = Sha256::digest(secret.as_bytes());

    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
