//! Password hashing and verification.
//!
//! Hashes are bcrypt strings (`$2b$<cost>$...`) stored as text by the user
//! storage. Hashing is CPU-bound; async callers should run it on the blocking
//! pool.

use bcrypt::{DEFAULT_COST, hash, verify};

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Length bounds accepted by [`check_password_strength`], in characters.
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 40;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password is longer than {MAX_PASSWORD_BYTES} bytes")]
    TooLong,

    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("{0}")]
    Weak(&'static str),
}

/// Hashes a raw password with bcrypt's default cost.
///
/// # Errors
///
/// Returns [`PasswordError::TooLong`] instead of silently truncating inputs
/// above [`MAX_PASSWORD_BYTES`].
pub fn hash_password(raw: &[u8]) -> Result<String, PasswordError> {
    hash_password_with_cost(raw, DEFAULT_COST)
}

pub fn hash_password_with_cost(raw: &[u8], cost: u32) -> Result<String, PasswordError> {
    if raw.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::TooLong);
    }

    Ok(hash(raw, cost)?)
}

/// Returns true if `raw` matches `stored_hash`.
///
/// A malformed stored hash is reported as a mismatch, never as an error.
pub fn verify_password(raw: &[u8], stored_hash: &str) -> bool {
    verify(raw, stored_hash).unwrap_or(false)
}

/// Password rule applied when provisioning accounts.
pub fn check_password_strength(raw: &str) -> Result<(), PasswordError> {
    let len = raw.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(PasswordError::Weak("password must be at least 8 characters"));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(PasswordError::Weak("password must be at most 40 characters"));
    }
    if !raw.chars().any(char::is_alphabetic) {
        return Err(PasswordError::Weak("password must contain a letter"));
    }
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::Weak("password must contain a digit"));
    }
    if raw.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::TooLong);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // minimum bcrypt cost keeps the suite fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_password_success() {
        let hash = hash_password_with_cost(b"testpassword123", TEST_COST).unwrap();

        assert!(!hash.is_empty());
        assert_ne!(hash, "testpassword123");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_hash_password_is_salted() {
        let first = hash_password_with_cost(b"samepassword1", TEST_COST).unwrap();
        let second = hash_password_with_cost(b"samepassword1", TEST_COST).unwrap();

        assert_ne!(first, second);
        assert!(verify_password(b"samepassword1", &first));
        assert!(verify_password(b"samepassword1", &second));
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password_with_cost(b"mypassword123", TEST_COST).unwrap();
        assert!(verify_password(b"mypassword123", &hash));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password_with_cost(b"mypassword123", TEST_COST).unwrap();
        assert!(!verify_password(b"wrongpassword", &hash));
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        assert!(!verify_password(b"mypassword123", "not-a-bcrypt-hash"));
        assert!(!verify_password(b"mypassword123", ""));
    }

    #[test]
    fn test_hash_password_too_long() {
        let raw = vec![b'a'; MAX_PASSWORD_BYTES + 1];
        let result = hash_password_with_cost(&raw, TEST_COST);

        assert!(matches!(result, Err(PasswordError::TooLong)));
    }

    #[test]
    fn test_hash_password_at_limit() {
        let raw = vec![b'a'; MAX_PASSWORD_BYTES];
        let hash = hash_password_with_cost(&raw, TEST_COST).unwrap();

        assert!(verify_password(&raw, &hash));
    }

    #[test]
    fn test_password_strength() {
        assert!(check_password_strength("qwerty123").is_ok());
        assert!(check_password_strength("short1").is_err());
        assert!(check_password_strength("onlyletters").is_err());
        assert!(check_password_strength("1234567890").is_err());
        assert!(check_password_strength(&format!("a1{}", "x".repeat(40))).is_err());
    }
}
