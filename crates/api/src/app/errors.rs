use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use cowing_accounts::AccountError;

use crate::app::envelope::Envelope;

/// Failure body: the envelope plus a machine-readable `error` tag.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// Every error a handler can return. Rendered as `{code, message, error}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An account operation failed; `context` names the operation.
    #[error("{context}: {source}")]
    Account {
        context: &'static str,
        source: AccountError,
    },

    #[error("인증에 실패했습니다: {0}")]
    Unauthorized(String),

    #[error("요청 본문이 올바르지 않습니다: {0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn account(context: &'static str, source: AccountError) -> Self {
        Self::Account { context, source }
    }

    /// `map_err` adapter: `.map_err(ApiError::during(CONTEXT))`.
    pub fn during(context: &'static str) -> impl FnOnce(AccountError) -> Self {
        move |source| Self::account(context, source)
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }

    pub fn status(&self) -> StatusCode {
        self.classify().0
    }

    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Account { source, .. } => status_for(source),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "invalid_body"),
        }
    }

    fn client_message(&self) -> String {
        match self {
            // Internal details stay in the logs.
            ApiError::Account {
                context,
                source: AccountError::Internal(_),
            } => format!("{context}: internal error"),
            other => other.to_string(),
        }
    }
}

/// The one place account failures become HTTP statuses.
pub fn status_for(err: &AccountError) -> (StatusCode, &'static str) {
    match err {
        AccountError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        AccountError::InvalidCredential => (StatusCode::BAD_REQUEST, "invalid_credential"),
        AccountError::DuplicateAccount(_) => (StatusCode::BAD_REQUEST, "duplicate_account"),
        AccountError::AccountNotFound => (StatusCode::NOT_FOUND, "account_not_found"),
        AccountError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, tag) = self.classify();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = tag, "{self}");
        } else {
            tracing::warn!(status = status.as_u16(), error = tag, "{self}");
        }

        Envelope::with_body(status, self.client_message(), ErrorBody { error: tag }).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}
