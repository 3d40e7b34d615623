//! Cache key layout.
//!
//! Keys are `<prefix>:<namespace>:<id>`. Raw tokens never appear in keys or
//! logs; they are stored by SHA-256 digest.

use sha2::{Digest, Sha256};

/// Key of the blacklist entry for `token`.
///
/// ```text
/// skadi:token:blacklisted:3f2a...e9
/// ```
pub fn blacklist_key(prefix: &str, token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{}:token:blacklisted:{}", prefix, hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blacklist_key_layout() {
        let key = blacklist_key("skadi", "header.payload.signature");

        assert!(key.starts_with("skadi:token:blacklisted:"));
        let digest = key.rsplit(':').next().unwrap();
        assert_eq!(digest.len(), 64);
        assert!(!key.contains("payload"));
    }

    #[test]
    fn test_blacklist_key_is_stable() {
        assert_eq!(blacklist_key("p", "abc"), blacklist_key("p", "abc"));
        assert_ne!(blacklist_key("p", "abc"), blacklist_key("p", "abd"));
        assert_ne!(blacklist_key("p", "abc"), blacklist_key("q", "abc"));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            blacklist_key("skadi", "abc"),
            "skadi:token:blacklisted:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
