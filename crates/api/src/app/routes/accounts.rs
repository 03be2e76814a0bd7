use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode};

use cowing_accounts::{NewAccount, UserInfo};

use crate::app::dto::{
    ApiJson, AssetBody, NicknameChangeRequest, PasswordChangeRequest, PortfolioBody, RegisterRequest,
};
use crate::app::envelope::Envelope;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

const SIGNUP_OK: &str = "회원가입에 성공하였습니다. 축하드립니다!";
const SIGNUP_FAILED: &str = "회원가입에 실패했습니다";
const PASSWORD_CHANGED: &str = "비밀번호가 변경되었습니다!";
const PASSWORD_CHANGE_FAILED: &str = "비밀번호 변경에 실패했습니다";
const NICKNAME_CHANGED: &str = "닉네임이 변경되었습니다!";
const NICKNAME_CHANGE_FAILED: &str = "닉네임 변경에 실패했습니다";
const PORTFOLIO_FOUND: &str = "포트폴리오 조회 성공";
const PORTFOLIO_EMPTY: &str = "포트폴리오가 존재하지 않습니다.";
const PORTFOLIO_FAILED: &str = "포트폴리오 조회에 실패했습니다";
const ASSET_FOUND: &str = "원화 자산 조회 성공";
const ASSET_FAILED: &str = "원화 자산 조회에 실패했습니다";
const INFO_FAILED: &str = "유저 정보 조회에 실패했습니다";
const DELETED: &str = "탈퇴 처리 되었습니다.";
const DELETION_FAILED: &str = "탈퇴 처리에 실패했습니다";
const BANKRUPTED: &str = "파산 신청이 완료되었습니다.";
const BANKRUPTCY_FAILED: &str = "파산 신청에 실패했습니다";

/// 회원가입
///
/// 이메일, 비밀번호, 닉네임, 유저명을 입력하여 회원가입
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    tag = "accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "회원가입 성공"),
        (status = 400, description = "회원가입 실패")
    )
)]
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Envelope, ApiError> {
    services
        .run_blocking(move |users| {
            users.register_user(NewAccount {
                email: &body.email,
                password: &body.passwd,
                nickname: &body.nickname,
                username: &body.username,
            })
        })
        .await
        .map_err(ApiError::during(SIGNUP_FAILED))?;

    Ok(Envelope::new(StatusCode::CREATED, SIGNUP_OK))
}

/// 비밀번호 변경
///
/// 현재 비밀번호를 확인하여 비밀번호 변경
#[utoipa::path(
    post,
    path = "/api/v1/change/passwd",
    tag = "accounts",
    security(("bearer_jwt" = [])),
    request_body = PasswordChangeRequest,
    responses(
        (status = 201, description = "비밀번호 변경 성공"),
        (status = 400, description = "현재 비밀번호 오입력으로 실패"),
        (status = 401, description = "인증 실패")
    )
)]
pub async fn change_password(
    Extension(services): Extension<Arc<AppServices>>,
    principal: PrincipalContext,
    ApiJson(body): ApiJson<PasswordChangeRequest>,
) -> Result<Envelope, ApiError> {
    let username = principal.username().clone();
    services
        .run_blocking(move |users| users.update_password(&username, &body.current_pwd, &body.new_pwd))
        .await
        .map_err(ApiError::during(PASSWORD_CHANGE_FAILED))?;

    Ok(Envelope::new(StatusCode::CREATED, PASSWORD_CHANGED))
}

/// 닉네임 변경
///
/// 로그인된 유저의 닉네임 변경
#[utoipa::path(
    post,
    path = "/api/v1/change/nickname",
    tag = "accounts",
    security(("bearer_jwt" = [])),
    request_body = NicknameChangeRequest,
    responses(
        (status = 201, description = "닉네임 변경 성공"),
        (status = 400, description = "닉네임 변경 실패"),
        (status = 401, description = "인증 실패")
    )
)]
pub async fn change_nickname(
    Extension(services): Extension<Arc<AppServices>>,
    principal: PrincipalContext,
    ApiJson(body): ApiJson<NicknameChangeRequest>,
) -> Result<Envelope, ApiError> {
    services
        .users()
        .update_nickname(principal.username(), &body.nickname)
        .map_err(ApiError::during(NICKNAME_CHANGE_FAILED))?;

    Ok(Envelope::new(StatusCode::CREATED, NICKNAME_CHANGED))
}

/// 포트폴리오 조회
///
/// 로그인된 유저의 포트폴리오 조회
#[utoipa::path(
    get,
    path = "/api/v1/portfolio",
    tag = "accounts",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "포트폴리오 조회 성공, 아직 거래내역 없을 시 존재하지 않는다는 메세지와 빈 배열 전달"),
        (status = 401, description = "인증 실패")
    )
)]
pub async fn get_portfolio(
    Extension(services): Extension<Arc<AppServices>>,
    principal: PrincipalContext,
) -> Result<Envelope<PortfolioBody>, ApiError> {
    let data = services
        .users()
        .get_portfolio(principal.username())
        .map_err(ApiError::during(PORTFOLIO_FAILED))?;

    // An empty portfolio is a normal state, not an error.
    let message = if data.is_empty() { PORTFOLIO_EMPTY } else { PORTFOLIO_FOUND };
    Ok(Envelope::with_body(StatusCode::OK, message, PortfolioBody { data }))
}

/// 원화 자산 조회
///
/// 로그인된 유저의 원화(KRW) 자산 조회
#[utoipa::path(
    get,
    path = "/api/v1/asset",
    tag = "accounts",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "원화 자산 조회 성공"),
        (status = 401, description = "인증 실패")
    )
)]
pub async fn get_asset(
    Extension(services): Extension<Arc<AppServices>>,
    principal: PrincipalContext,
) -> Result<Envelope<AssetBody>, ApiError> {
    let asset = services
        .users()
        .get_user_asset(principal.username())
        .map_err(ApiError::during(ASSET_FAILED))?;

    Ok(Envelope::with_body(StatusCode::OK, ASSET_FOUND, AssetBody { asset }))
}

/// 유저 정보 조회
///
/// 로그인된 유저의 기본 정보 조회. 봉투 없이 정보 객체 자체를 반환한다.
#[utoipa::path(
    get,
    path = "/api/v1/infos",
    tag = "accounts",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "유저 정보 조회 성공"),
        (status = 401, description = "인증 실패")
    )
)]
pub async fn get_user_info(
    Extension(services): Extension<Arc<AppServices>>,
    principal: PrincipalContext,
) -> Result<Json<UserInfo>, ApiError> {
    services
        .users()
        .get_user_info(principal.username())
        .map(Json)
        .map_err(ApiError::during(INFO_FAILED))
}

/// 계정 탈퇴
///
/// 로그인된 유저의 계정 탈퇴
#[utoipa::path(
    post,
    path = "/api/v1/deletion",
    tag = "accounts",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "탈퇴 성공"),
        (status = 401, description = "인증 실패")
    )
)]
pub async fn delete_account(
    Extension(services): Extension<Arc<AppServices>>,
    principal: PrincipalContext,
) -> Result<Envelope, ApiError> {
    services
        .users()
        .mark_as_deleted_user(principal.username())
        .map_err(ApiError::during(DELETION_FAILED))?;

    Ok(Envelope::new(StatusCode::OK, DELETED))
}

/// 파산 신청
///
/// 로그인된 유저의 보유 자산을 초기화하고 파산 횟수를 올린다
#[utoipa::path(
    post,
    path = "/api/v1/bankrupt",
    tag = "accounts",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "파산 신청 성공"),
        (status = 401, description = "인증 실패")
    )
)]
pub async fn bankrupt(
    Extension(services): Extension<Arc<AppServices>>,
    principal: PrincipalContext,
) -> Result<Envelope, ApiError> {
    services
        .users()
        .bankrupt(principal.username())
        .map_err(ApiError::during(BANKRUPTCY_FAILED))?;

    Ok(Envelope::new(StatusCode::OK, BANKRUPTED))
}
