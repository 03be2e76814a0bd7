use std::sync::Arc;

use cowing_core::Username;

use crate::{AccountResult, PortfolioEntry, UserInfo};

/// Raw sign-up input, validated by the service.
#[derive(Debug, Clone, Copy)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub nickname: &'a str,
    pub username: &'a str,
}

/// User-account operations behind the REST layer.
///
/// All calls are synchronous and keyed by username. Failures are reported
/// through [`crate::AccountError`] only.
pub trait UserService: Send + Sync {
    fn register_user(&self, account: NewAccount<'_>) -> AccountResult<()>;

    /// Check a username/password pair for login.
    fn authenticate(&self, username: &str, password: &str) -> AccountResult<Username>;

    fn update_password(&self, username: &Username, current: &str, new: &str) -> AccountResult<()>;

    fn update_nickname(&self, username: &Username, nickname: &str) -> AccountResult<()>;

    fn get_portfolio(&self, username: &Username) -> AccountResult<Vec<PortfolioEntry>>;

    /// KRW cash balance.
    fn get_user_asset(&self, username: &Username) -> AccountResult<i64>;

    fn get_user_info(&self, username: &Username) -> AccountResult<UserInfo>;

    /// Soft delete. Repeating it is not an error.
    fn mark_as_deleted_user(&self, username: &Username) -> AccountResult<()>;

    /// Wipe holdings and restart from the initial KRW balance.
    fn bankrupt(&self, username: &Username) -> AccountResult<()>;
}

impl<S> UserService for Arc<S>
where
    S: UserService + ?Sized,
{
    fn register_user(&self, account: NewAccount<'_>) -> AccountResult<()> {
        (**self).register_user(account)
    }

    fn authenticate(&self, username: &str, password: &str) -> AccountResult<Username> {
        (**self).authenticate(username, password)
    }

    fn update_password(&self, username: &Username, current: &str, new: &str) -> AccountResult<()> {
        (**self).update_password(username, current, new)
    }

    fn update_nickname(&self, username: &Username, nickname: &str) -> AccountResult<()> {
        (**self).update_nickname(username, nickname)
    }

    fn get_portfolio(&self, username: &Username) -> AccountResult<Vec<PortfolioEntry>> {
        (**self).get_portfolio(username)
    }

    fn get_user_asset(&self, username: &Username) -> AccountResult<i64> {
        (**self).get_user_asset(username)
    }

    fn get_user_info(&self, username: &Username) -> AccountResult<UserInfo> {
        (**self).get_user_info(username)
    }

    fn mark_as_deleted_user(&self, username: &Username) -> AccountResult<()> {
        (**self).mark_as_deleted_user(username)
    }

    fn bankrupt(&self, username: &Username) -> AccountResult<()> {
        (**self).bankrupt(username)
    }
}
