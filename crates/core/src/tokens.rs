//! Opaque token generation for refresh sessions and password resets.
//!
//! The plaintext goes to the client exactly once. Only its SHA-256
//! digest is stored, so a database leak does not expose usable tokens.

use rand::Rng;

use crate::hashing::sha256_hex;

/// Length of a generated reset token (alphanumeric characters).
pub const RESET_TOKEN_LENGTH: usize = 48;

/// Default reset token lifetime in minutes.
pub const DEFAULT_RESET_TOKEN_EXPIRY_MINS: i64 = 30;

/// A freshly generated one-time token.
pub struct GeneratedToken {
    /// Sent to the user; never persisted.
    pub plaintext: String,
    /// SHA-256 hex digest of `plaintext`; persisted.
    pub hash: String,
}

/// Generate a random reset token and its digest.
pub fn generate_reset_token() -> GeneratedToken {
    let plaintext: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(RESET_TOKEN_LENGTH)
        .map(char::from)
        .collect();
    let hash = hash_token(&plaintext);
    GeneratedToken { plaintext, hash }
}

/// Random bytes behind a refresh token (hex-encoded to 64 characters).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate a refresh token and its digest.
pub fn generate_refresh_token() -> GeneratedToken {
    let bytes: [u8; REFRESH_TOKEN_BYTES] = rand::rng().random();
    let plaintext: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    let hash = hash_token(&plaintext);
    GeneratedToken { plaintext, hash }
}

/// Digest used to look a token up.
pub fn hash_token(token: &str) -> String {
    sha256_hex(token.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_has_expected_shape() {
        let token = generate_reset_token();
        assert_eq!(token.plaintext.len(), RESET_TOKEN_LENGTH);
        assert!(token.plaintext.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(token.hash.len(), 64);
    }

    #[test]
    fn hash_is_stable() {
        let token = generate_reset_token();
        assert_eq!(hash_token(&token.plaintext), token.hash);
    }

    #[test]
    fn refresh_token_is_lowercase_hex() {
        let token = generate_refresh_token();
        assert_eq!(token.plaintext.len(), REFRESH_TOKEN_BYTES * 2);
        assert!(token
            .plaintext
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(hash_token(&token.plaintext), token.hash);
    }

    #[test]
    fn tokens_are_unique() {
        let a = generate_reset_token();
        let b = generate_reset_token();
        assert_ne!(a.plaintext, b.plaintext);
        assert_ne!(a.hash, b.hash);
    }
}
