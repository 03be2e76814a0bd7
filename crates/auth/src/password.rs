//! Argon2 password hashing (PHC string format).

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;

use cowing_core::Password;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to hash password: {0}")]
pub struct PasswordHashError(String);

/// Hash a validated password with a fresh random salt.
pub fn hash_password(password: &Password) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordHashError(e.to_string()))
}

/// Check a candidate against a stored PHC hash.
///
/// An unparseable stored hash never verifies.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}
