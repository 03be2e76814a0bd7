use axum::{
    Router,
    routing::{get, post},
};

pub mod accounts;
pub mod session;
pub mod system;

/// Endpoints reachable without a bearer token.
pub fn public_router() -> Router {
    Router::new()
        .route("/signup", post(accounts::register))
        .route("/login", post(session::login))
}

/// Endpoints that require an authenticated principal.
pub fn protected_router() -> Router {
    Router::new()
        .route("/change/passwd", post(accounts::change_password))
        .route("/change/nickname", post(accounts::change_nickname))
        .route("/portfolio", get(accounts::get_portfolio))
        .route("/asset", get(accounts::get_asset))
        .route("/infos", get(accounts::get_user_info))
        .route("/deletion", post(accounts::delete_account))
        .route("/bankrupt", post(accounts::bankrupt))
}
