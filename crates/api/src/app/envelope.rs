//! Uniform response envelope: `{code, message, ...body}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Body for envelopes that carry nothing beyond `code` and `message`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Empty {}

/// Response wrapper shared by success and failure paths.
///
/// `body` is flattened next to `code`/`message`, so a payload type with a
/// `data` field yields `{"code":..,"message":..,"data":..}`. `code` always
/// mirrors the HTTP status.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T = Empty> {
    #[serde(skip)]
    status: StatusCode,
    code: u16,
    message: String,
    #[serde(flatten)]
    body: T,
}

impl Envelope<Empty> {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::with_body(status, message, Empty {})
    }
}

impl<T> Envelope<T> {
    pub fn with_body(status: StatusCode, message: impl Into<String>, body: T) -> Self {
        Self {
            status,
            code: status.as_u16(),
            message: message.into(),
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
