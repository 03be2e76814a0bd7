use axum::extract::FromRequest;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use cowing_accounts::PortfolioEntry;

use crate::app::errors::ApiError;

/// `Json` extractor whose rejection renders as the failure envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

// -------------------------
// Request DTOs
// -------------------------

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub passwd: String,
    pub nickname: String,
    pub username: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub passwd: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub current_pwd: String,
    pub new_pwd: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NicknameChangeRequest {
    pub nickname: String,
}

// -------------------------
// Envelope bodies
// -------------------------

#[derive(Debug, Serialize)]
pub struct PortfolioBody {
    pub data: Vec<PortfolioEntry>,
}

#[derive(Debug, Serialize)]
pub struct AssetBody {
    pub asset: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBody {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}
