//! Collaborators shared by all handlers.

use std::sync::Arc;

use cowing_accounts::{AccountError, AccountResult, UserService};
use cowing_auth::Hs256TokenIssuer;

use crate::config::ApiConfig;

/// Handler-side dependencies, injected as an `Extension`.
#[derive(Clone)]
pub struct AppServices {
    users: Arc<dyn UserService>,
    tokens: Hs256TokenIssuer,
}

impl AppServices {
    pub fn new(config: &ApiConfig, users: Arc<dyn UserService>) -> Self {
        Self {
            users,
            tokens: Hs256TokenIssuer::new(config.jwt_secret(), config.token_ttl()),
        }
    }

    pub fn users(&self) -> &dyn UserService {
        self.users.as_ref()
    }

    /// Run a service call on the blocking pool.
    ///
    /// For calls that hash or verify passwords, which take milliseconds of CPU.
    pub async fn run_blocking<T, F>(&self, f: F) -> AccountResult<T>
    where
        F: FnOnce(&dyn UserService) -> AccountResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let users = Arc::clone(&self.users);
        tokio::task::spawn_blocking(move || f(users.as_ref()))
            .await
            .map_err(|e| AccountError::internal(format!("blocking task failed: {e}")))?
    }

    pub fn tokens(&self) -> &Hs256TokenIssuer {
        &self.tokens
    }
}
