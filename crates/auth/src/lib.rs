//! `cowing-auth`: authentication boundary.
//!
//! Turns bearer tokens into a [`Principal`] and owns password hashing.
//! Decoupled from HTTP and storage.

pub mod claims;
pub mod jwt;
pub mod password;
pub mod principal;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, Hs256TokenIssuer, IssuedToken, JwtValidator, TokenIssueError};
pub use password::{PasswordHashError, hash_password, verify_password};
pub use principal::Principal;
