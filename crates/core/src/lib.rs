//! `cowing-core`: domain building blocks shared by the account crates.
//!
//! Pure domain primitives only (no HTTP, no storage).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
pub use value_object::{Email, Nickname, Password, Username, ValueObject};
