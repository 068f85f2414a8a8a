//! 账号密码哈希
//!
//! Management accounts store Argon2id PHC strings; plaintext never reaches
//! the key-value store.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

/// PHC prefix shared by argon2i / argon2d / argon2id hashes.
const ARGON2_PHC_PREFIX: &str = "$argon2";

#[derive(Debug, PartialEq, Eq)]
pub enum PasswordError {
    Empty,
    Hash(String),
    /// The stored value is not a parseable PHC string.
    MalformedHash(String),
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordError::Empty => write!(f, "Password must not be empty"),
            PasswordError::Hash(msg) => write!(f, "Failed to hash password: {}", msg),
            PasswordError::MalformedHash(msg) => write!(f, "Stored password hash is malformed: {}", msg),
        }
    }
}

impl std::error::Error for PasswordError {}

/// Hash a new account password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a Basic-auth password against a stored hash.
///
/// A wrong password is `Ok(false)`; only an unreadable hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// 判断存储的密码字段是否为 Argon2 哈希
pub fn is_argon2_hash(value: &str) -> bool {
    value.starts_with(ARGON2_PHC_PREFIX)
}
