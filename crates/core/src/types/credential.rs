//! Stored admin credential.
//!
//! The `password_hash` column has held two shapes over the life of the
//! `admin_users` table: Argon2 PHC strings and plain passwords. Verification
//! accepts both so existing rows keep working; everything written from now on
//! is an Argon2id hash.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Prefix shared by every Argon2 PHC string (`$argon2id$`, `$argon2i$`, ...).
const ARGON2_PREFIX: &str = "$argon2";

/// Errors produced while creating a credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Password was empty.
    #[error("password cannot be empty")]
    EmptyPassword,

    /// Argon2 failed to hash the password.
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// The value kept in the `password_hash` column.
///
/// `Debug` never prints the stored value.
#[derive(Clone)]
pub struct StoredCredential(SecretString);

impl StoredCredential {
    /// Wrap a value read from the table store.
    #[must_use]
    pub fn from_stored(value: String) -> Self {
        Self(SecretString::from(value))
    }

    /// Hash a new password with Argon2id and a random salt.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::EmptyPassword`] for an empty password, or
    /// [`CredentialError::Hash`] if Argon2 rejects the input.
    pub fn hash(password: &str) -> Result<Self, CredentialError> {
        if password.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hash(e.to_string()))?;

        Ok(Self(SecretString::from(hash.to_string())))
    }

    /// Whether the stored value is an Argon2 hash rather than a plain password.
    #[must_use]
    pub fn is_hashed(&self) -> bool {
        self.0.expose_secret().starts_with(ARGON2_PREFIX)
    }

    /// Check a supplied password against the stored value.
    ///
    /// An Argon2 value that fails to parse never matches.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let stored = self.0.expose_secret();

        if self.is_hashed() {
            return PasswordHash::new(stored).is_ok_and(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            });
        }

        bool::from(stored.as_bytes().ct_eq(password.as_bytes()))
    }

    /// The value to write back to the `password_hash` column.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StoredCredential")
            .field(&"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let credential = StoredCredential::hash("correct horse").unwrap();
        assert!(credential.is_hashed());
        assert!(credential.verify("correct horse"));
        assert!(!credential.verify("wrong horse"));
    }

    #[test]
    fn test_hash_rejects_empty() {
        assert!(matches!(
            StoredCredential::hash(""),
            Err(CredentialError::EmptyPassword)
        ));
    }

    #[test]
    fn test_plaintext_rows_still_verify() {
        let credential = StoredCredential::from_stored("admin1234".to_owned());
        assert!(!credential.is_hashed());
        assert!(credential.verify("admin1234"));
        assert!(!credential.verify("admin123"));
        assert!(!credential.verify(""));
    }

    #[test]
    fn test_corrupt_hash_never_matches() {
        let credential = StoredCredential::from_stored("$argon2id$garbage".to_owned());
        assert!(!credential.verify("$argon2id$garbage"));
    }

    #[test]
    fn test_debug_redacts() {
        let credential = StoredCredential::from_stored("hunter2".to_owned());
        let debug = format!("{credential:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
