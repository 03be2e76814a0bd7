//! OpenAPI document for the account endpoints, served at [`OPENAPI_PATH`].

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::app::dto::{LoginRequest, NicknameChangeRequest, PasswordChangeRequest, RegisterRequest};
use crate::app::routes::{accounts, session};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        accounts::register,
        session::login,
        accounts::change_password,
        accounts::change_nickname,
        accounts::get_portfolio,
        accounts::get_asset,
        accounts::get_user_info,
        accounts::delete_account,
        accounts::bankrupt,
    ),
    components(schemas(RegisterRequest, LoginRequest, PasswordChangeRequest, NicknameChangeRequest)),
    modifiers(&BearerJwt),
    tags(
        (name = "accounts", description = "회원 계정 API"),
        (name = "session", description = "토큰 발급")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_jwt` scheme referenced by protected paths.
struct BearerJwt;

impl Modify for BearerJwt {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
