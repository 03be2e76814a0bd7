//! HTTP application wiring (Axum router + collaborators).
//!
//! - `services.rs`: collaborators handed to handlers
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: request DTOs and envelope bodies
//! - `envelope.rs`: the `{code, message, ...}` response shape
//! - `errors.rs`: error type and the status policy table
//! - `openapi.rs`: generated API document

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use cowing_accounts::UserService;
use cowing_auth::Hs256JwtValidator;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod envelope;
pub mod errors;
pub mod openapi;
pub mod routes;
pub mod services;

/// Prefix shared by all account endpoints.
pub const API_PREFIX: &str = "/api/v1";

/// Build the full HTTP router (used by `main.rs` and the black-box tests).
pub fn build_app(config: &ApiConfig, users: Arc<dyn UserService>) -> Router {
    let auth_state = middleware::AuthState {
        jwt: Arc::new(Hs256JwtValidator::new(config.jwt_secret())),
    };
    let services = Arc::new(services::AppServices::new(config, users));

    // `route_layer` so unknown paths stay 404 instead of 401.
    let protected = routes::protected_router().route_layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route(openapi::OPENAPI_PATH, get(routes::system::openapi))
        .nest(API_PREFIX, routes::public_router().merge(protected))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        )
}
