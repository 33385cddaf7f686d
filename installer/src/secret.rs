//! Signing-secret generation.
//!
//! The app signs its session tokens with a secret generated once per
//! installation. The value is high-entropy, unique per run, and must never be
//! hardcoded or logged.

/// Length of the generated signing secret.
pub const SECRET_LEN: usize = 64;

/// Alphabet the secret is drawn from (lowercase alphanumerics).
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a fresh signing secret of [`SECRET_LEN`] lowercase
/// alphanumeric characters.
#[must_use]
pub fn signing_secret() -> String {
    (0..SECRET_LEN)
        .map(|_| {
            let index = fastrand::usize(..ALPHABET.len());
            char::from(ALPHABET[index])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_has_expected_length() {
        assert_eq!(signing_secret().len(), SECRET_LEN);
    }

    #[test]
    fn secret_uses_only_lowercase_alphanumerics() {
        let secret = signing_secret();
        assert!(
            secret
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn successive_secrets_differ() {
        assert_ne!(signing_secret(), signing_secret());
    }
}
