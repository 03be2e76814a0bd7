use axum::{extract::FromRequestParts, http::request::Parts};

use cowing_auth::Principal;
use cowing_core::Username;

use crate::app::errors::ApiError;

/// Caller identity for a request, resolved once by the auth middleware.
///
/// Handlers take this as a parameter; a route without the middleware fails
/// with 401 instead of running anonymously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn username(&self) -> &Username {
        self.principal.username()
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for PrincipalContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<PrincipalContext>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("missing principal"))
    }
}
