//! Password hashing with Argon2id
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=...`), which carry
//! their own salt and parameters.

use std::fmt;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{LedgerError, LedgerResult};
use crate::models::user::MAX_PASSWORD_LENGTH;
use crate::validation::{max_length, required, Field};

/// A plaintext password, wiped from memory on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Field rules: required and at most 255 characters
    pub fn field(&self) -> Field {
        Field::new(
            "Password",
            [
                required(self.as_str()),
                max_length(self.as_str(), MAX_PASSWORD_LENGTH),
            ],
        )
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl From<String> for Password {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &Password) -> LedgerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map_err(|e| LedgerError::Storage(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash
///
/// A malformed hash is an internal error; a wrong password is `Ok(false)`.
pub fn verify_password(password: &Password, hash: &str) -> LedgerResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| LedgerError::Storage(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_str().as_bytes(), &parsed)
        .is_ok())
}
