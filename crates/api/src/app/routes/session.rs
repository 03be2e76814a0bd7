use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode};
use chrono::Utc;

use cowing_accounts::AccountError;

use crate::app::dto::{ApiJson, LoginRequest, TokenBody};
use crate::app::envelope::Envelope;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

const LOGIN_OK: &str = "로그인에 성공하였습니다.";
const LOGIN_FAILED: &str = "로그인에 실패했습니다";

/// 로그인
///
/// 유저명과 비밀번호를 확인하여 Bearer 토큰 발급
#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공"),
        (status = 400, description = "유저명 혹은 비밀번호 오입력으로 실패")
    )
)]
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Envelope<TokenBody>, ApiError> {
    let username = services
        .run_blocking(move |users| users.authenticate(&body.username, &body.passwd))
        .await
        .map_err(ApiError::during(LOGIN_FAILED))?;

    let issued = services
        .tokens()
        .issue(&username, Utc::now())
        .map_err(|e| ApiError::account(LOGIN_FAILED, AccountError::internal(e.to_string())))?;

    tracing::info!(username = %username, "login succeeded");
    Ok(Envelope::with_body(
        StatusCode::OK,
        LOGIN_OK,
        TokenBody {
            token: issued.token,
            token_type: "Bearer",
            expires_in: issued.expires_in_secs,
        },
    ))
}
