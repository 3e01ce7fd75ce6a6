use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of the UTF-8 encoding of `text`.
///
/// Deliberately unsalted: identifier derivation relies on the digest being
/// reproducible across process restarts.
pub fn hex_digest(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}
