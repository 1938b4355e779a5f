//! Invitation token generation.
//!
//! Tokens are the public key of an RSVP link, so they come straight from the
//! operating system's CSPRNG. There is no fallback to a weaker generator: if
//! the OS source fails the error is returned to the caller.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::CoreError;

/// Number of random bytes in a token.
pub const TOKEN_BYTES: usize = 16;

/// Length of the hex-encoded token string.
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// How many candidate tokens the invitation store tries before giving up.
pub const MAX_TOKEN_ATTEMPTS: u32 = 5;

/// Generate a new invitation token: 16 random bytes, lowercase hex encoded.
pub fn generate_token() -> Result<String, CoreError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CoreError::RandomSource(e.to_string()))?;
    Ok(hex::encode(bytes))
}

/// Cheap shape check used before hitting the database with a token lookup.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LENGTH && token.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn token_is_32_lowercase_hex_chars() {
        let token = generate_token().unwrap();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_token().unwrap()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn well_formed_check() {
        assert!(is_well_formed(&generate_token().unwrap()));
        assert!(!is_well_formed("abc"));
        assert!(!is_well_formed("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"));
        assert!(!is_well_formed(""));
    }
}
