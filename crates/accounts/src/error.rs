use thiserror::Error;

use cowing_core::DomainError;

pub type AccountResult<T> = Result<T, AccountError>;

/// Every way an account operation can fail.
///
/// Closed on purpose: the HTTP layer maps each variant to a status in one place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Input failed the account rules.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// Username/password pair did not match an active account.
    #[error("invalid credentials")]
    InvalidCredential,

    /// The named field (`email` or `username`) is already taken.
    #[error("{0} is already registered")]
    DuplicateAccount(&'static str),

    #[error("account not found")]
    AccountNotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AccountError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
