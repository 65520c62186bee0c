//! Password value object.
//!
//! Encapsulates Argon2 hashing and verification. The persisted schema stores
//! the hash and the salt in separate opaque columns, so both travel together
//! in this value object.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Hashed password plus the salt it was derived with.
#[derive(Clone)]
pub struct Password {
    hash: String,
    salt: String,
}

// Don't expose secrets in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain-text password with a freshly generated salt.
    ///
    /// # Errors
    /// Returns a validation error if the password is too short.
    pub fn generate(plain_text: &str) -> AppResult<Self> {
        if plain_text.len() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self {
            hash,
            salt: salt.to_string(),
        })
    }

    /// Reconstruct a Password from stored columns.
    pub fn from_stored(hash: String, salt: String) -> Self {
        Self { hash, salt }
    }

    /// The hash string for storage.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The salt string for storage.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Verify a plain-text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.salt == other.salt
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::generate(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_password_from_stored() {
        let plain = "TestPassword123";
        let password = Password::generate(plain).unwrap();

        let restored =
            Password::from_stored(password.hash().to_string(), password.salt().to_string());
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_hash_is_opaque() {
        let plain = "TestPassword123";
        let password = Password::generate(plain).unwrap();

        // The stored hash never equals the plaintext
        assert_ne!(password.hash(), plain);
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::generate(plain).unwrap();
        let pass2 = Password::generate(plain).unwrap();

        // Different salts produce different hashes
        assert_ne!(pass1.salt(), pass2.salt());
        assert_ne!(pass1.hash(), pass2.hash());
        // But both verify correctly
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_password_too_short() {
        let result = Password::generate("short");
        assert!(result.is_err());
    }

    #[test]
    fn test_password_minimum_length() {
        // Exactly 8 characters should work
        let result = Password::generate("12345678");
        assert!(result.is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let password = Password::generate("TestPassword123").unwrap();
        let rendered = format!("{:?}", password);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains(password.salt()));
    }
}
