//! HTTP API for user accounts: routing, auth context, and response mapping.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;

pub use config::ApiConfig;
