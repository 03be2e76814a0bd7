use chrono::{DateTime, Utc};

use cowing_core::Username;

use crate::{JwtClaims, TokenValidationError};

/// Authenticated identity attached to a request.
///
/// Only carries what handlers need: who is calling, and until when the
/// credential that proved it stays valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: Username,
    expires_at: DateTime<Utc>,
}

impl Principal {
    /// Build a principal from claims that already passed signature and
    /// time-window checks.
    pub fn from_claims(claims: &JwtClaims) -> Result<Self, TokenValidationError> {
        let username = Username::parse(&claims.sub).map_err(|_| TokenValidationError::InvalidSubject)?;
        let expires_at = claims
            .expires_at()
            .ok_or(TokenValidationError::InvalidTimeWindow)?;
        Ok(Self { username, expires_at })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
