//! Validated account attributes.
//!
//! Each type can only be built through `parse`, so holding one means the
//! value already satisfies the account rules.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects (immutable, compared by value).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

const EMAIL_MAX_LEN: usize = 254;
const USERNAME_MIN_LEN: usize = 4;
const USERNAME_MAX_LEN: usize = 20;
const NICKNAME_MIN_LEN: usize = 2;
const NICKNAME_MAX_LEN: usize = 12;
const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 64;

/// Login email address, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let value = raw.trim().to_lowercase();
        if value.is_empty() {
            return Err(DomainError::validation("email", "must not be empty"));
        }
        if value.len() > EMAIL_MAX_LEN {
            return Err(DomainError::validation(
                "email",
                format!("must be at most {EMAIL_MAX_LEN} characters"),
            ));
        }
        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::validation("email", "missing '@'"));
        };
        if local.is_empty() || domain.contains('@') {
            return Err(DomainError::validation("email", "malformed address"));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(DomainError::validation("email", "malformed domain"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::validation("email", "must not contain whitespace"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Email {}

/// Unique account handle; also the JWT subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let value = raw.trim();
        let len = value.chars().count();
        if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
            return Err(DomainError::validation(
                "username",
                format!("must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters"),
            ));
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DomainError::validation(
                "username",
                "only ASCII letters, digits and '_' are allowed",
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Username {}

impl core::fmt::Display for Username {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name shown to other traders. Not unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nickname(String);

impl Nickname {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let value = raw.trim();
        let len = value.chars().count();
        if !(NICKNAME_MIN_LEN..=NICKNAME_MAX_LEN).contains(&len) {
            return Err(DomainError::validation(
                "nickname",
                format!("must be {NICKNAME_MIN_LEN}-{NICKNAME_MAX_LEN} characters"),
            ));
        }
        if value.chars().any(char::is_control) {
            return Err(DomainError::validation(
                "nickname",
                "must not contain control characters",
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Nickname {}

/// Plaintext password that passed the strength rules.
///
/// Never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let len = raw.chars().count();
        if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
            return Err(DomainError::validation(
                "password",
                format!("must be {PASSWORD_MIN_LEN}-{PASSWORD_MAX_LEN} characters"),
            ));
        }
        if !raw.chars().any(|c| c.is_alphabetic()) {
            return Err(DomainError::validation("password", "must contain a letter"));
        }
        if !raw.chars().any(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation("password", "must contain a digit"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Password {}

impl core::fmt::Debug for Password {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Password(***)")
    }
}
