use axum::{Json, http::StatusCode};
use utoipa::OpenApi;

use crate::app::openapi::ApiDoc;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
