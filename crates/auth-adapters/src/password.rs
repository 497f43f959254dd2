//! Argon2 implementation of the `PasswordHasher` port.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::Argon2;

use domains::{AppError, Result};

/// Salted argon2id hashing with the library's recommended defaults.
pub struct Argon2Hasher;

impl domains::PasswordHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(AppError::internal)
    }

    /// Verifies a password against a stored PHC string. A hash that fails
    /// to parse counts as a mismatch rather than an error.
    fn verify(&self, plain: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::PasswordHasher as _;

    #[test]
    fn hash_and_verify_round_trip() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("123456").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("123456", &hash));
        assert!(!hasher.verify("wrongpass", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = Argon2Hasher;
        assert_ne!(hasher.hash("123456").unwrap(), hasher.hash("123456").unwrap());
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        assert!(!Argon2Hasher.verify("123456", "not-a-phc-string"));
    }
}
