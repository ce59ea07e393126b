//! Password hashing for portal users.
//!
//! New and changed passwords are stored as Argon2id PHC strings. Rows that
//! predate hashing still hold plaintext; those are compared in constant time.

use argon2::password_hash::{
    rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher,
    PasswordVerifier, SaltString,
};
use argon2::Argon2;
use subtle::ConstantTimeEq;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("failed to verify password: {0}")]
    Verify(String),
}

/// Hashes a password into a PHC string.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    if password.is_empty() {
        return Err(CredentialError::EmptyPassword);
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CredentialError::Hash(err.to_string()))
}

/// Checks a candidate password against a stored value.
pub fn verify_password(stored: &str, candidate: &str) -> Result<bool, CredentialError> {
    if candidate.is_empty() {
        return Ok(false);
    }

    let Ok(parsed) = PasswordHash::new(stored) else {
        return Ok(stored.as_bytes().ct_eq(candidate.as_bytes()).into());
    };

    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(err) => Err(CredentialError::Verify(err.to_string())),
    }
}
