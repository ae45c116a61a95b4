//! Random code generation for short links and API tokens.
//!
//! Codes are drawn from the URL-safe alphanumeric alphabet using the
//! thread-local CSPRNG.

use rand::Rng;

/// URL-safe alphabet for generated codes.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a recipe short code.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Length of an API token.
pub const TOKEN_LENGTH: usize = 48;

/// Generates a random string of `len` characters from [`CHARSET`].
pub fn random_string(len: usize) -> String {
    let mut rng = rand::rng();

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            char::from(CHARSET[idx])
        })
        .collect()
}

/// Generates a recipe short code.
///
/// Uniqueness is not guaranteed here; callers check the store and retry.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    random_string(SHORT_CODE_LENGTH)
}

/// Generates a raw API token (~286 bits of entropy).
pub fn generate_token() -> String {
    random_string(TOKEN_LENGTH)
}

/// Returns `true` if `code` could have been produced by [`generate_code`].
///
/// Used to reject malformed codes before touching the store.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == SHORT_CODE_LENGTH && code.bytes().all(|b| CHARSET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code().len(), SHORT_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_is_random() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        // 62^6 possible codes; a handful of collisions in 1000 draws would be
        // astronomically unlikely.
        assert!(codes.len() > 990);
    }

    #[test]
    fn test_generate_token_length() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_codes_are_valid() {
        for _ in 0..100 {
            assert!(is_valid_code(&generate_code()));
        }
    }

    #[test]
    fn test_is_valid_code_rejects_malformed() {
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("abc"));
        assert!(!is_valid_code("abcdefg"));
        assert!(!is_valid_code("ab-d_f"));
        assert!(!is_valid_code("абвгде"));
        assert!(is_valid_code("aB3dE9"));
    }
}
