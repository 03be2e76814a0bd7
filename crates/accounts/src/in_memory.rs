//! Process-local account store.
//!
//! Not durable. Every operation takes the lock once, so each call is atomic
//! with respect to other calls on the same service. Argon2 work never runs
//! under the lock; a password change re-checks the stored hash before it
//! swaps in the new one.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use cowing_auth::{hash_password, verify_password};
use cowing_core::{DomainError, Email, Nickname, Password, UserId, Username};

use crate::{AccountError, AccountResult, NewAccount, PortfolioEntry, UserInfo, UserService};

/// KRW credited on sign-up and after bankruptcy unless configured otherwise.
pub const DEFAULT_INITIAL_KRW_ASSET: i64 = 100_000_000;

#[derive(Debug, Clone)]
struct UserAccount {
    id: UserId,
    username: Username,
    email: Email,
    nickname: Nickname,
    password_hash: String,
    krw_asset: i64,
    holdings: BTreeMap<String, PortfolioEntry>,
    bankruptcy_count: u32,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl UserAccount {
    fn info(&self) -> UserInfo {
        UserInfo {
            username: self.username.as_str().to_string(),
            email: self.email.as_str().to_string(),
            nickname: self.nickname.as_str().to_string(),
            asset: self.krw_asset,
            bankruptcy_count: self.bankruptcy_count,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug)]
pub struct InMemoryUserService {
    initial_asset: i64,
    accounts: RwLock<HashMap<Username, UserAccount>>,
}

impl InMemoryUserService {
    pub fn new(initial_asset: i64) -> Self {
        Self {
            initial_asset,
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Upsert a position for `username`, keyed by market.
    ///
    /// A non-positive quantity removes the position. Trading lives outside
    /// this crate; this is how its fills (or test fixtures) land here.
    pub fn record_holding(&self, username: &Username, entry: PortfolioEntry) -> AccountResult<()> {
        let mut accounts = self.write()?;
        let account = accounts.get_mut(username).ok_or(AccountError::AccountNotFound)?;
        if entry.quantity <= 0.0 {
            account.holdings.remove(&entry.market);
        } else {
            account.holdings.insert(entry.market.clone(), entry);
        }
        Ok(())
    }

    /// Whether the account carries the soft-delete flag.
    pub fn is_deleted(&self, username: &Username) -> AccountResult<bool> {
        let accounts = self.read()?;
        let account = accounts.get(username).ok_or(AccountError::AccountNotFound)?;
        Ok(account.deleted_at.is_some())
    }

    /// Copy of the stored hash and the deletion flag, taken under a short read lock.
    fn credentials(&self, username: &Username) -> AccountResult<(String, bool)> {
        let accounts = self.read()?;
        let account = accounts.get(username).ok_or(AccountError::AccountNotFound)?;
        Ok((account.password_hash.clone(), account.deleted_at.is_some()))
    }

    fn read(&self) -> AccountResult<RwLockReadGuard<'_, HashMap<Username, UserAccount>>> {
        self.accounts
            .read()
            .map_err(|_| AccountError::internal("account store lock poisoned"))
    }

    fn write(&self) -> AccountResult<RwLockWriteGuard<'_, HashMap<Username, UserAccount>>> {
        self.accounts
            .write()
            .map_err(|_| AccountError::internal("account store lock poisoned"))
    }
}

impl Default for InMemoryUserService {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_KRW_ASSET)
    }
}

impl UserService for InMemoryUserService {
    fn register_user(&self, account: NewAccount<'_>) -> AccountResult<()> {
        let email = Email::parse(account.email)?;
        let password = Password::parse(account.password)?;
        let nickname = Nickname::parse(account.nickname)?;
        let username = Username::parse(account.username)?;

        let password_hash = hash_password(&password).map_err(|e| AccountError::internal(e.to_string()))?;

        let mut accounts = self.write()?;
        if accounts.contains_key(&username) {
            tracing::warn!(username = %username, "sign-up rejected: username taken");
            return Err(AccountError::DuplicateAccount("username"));
        }
        if accounts.values().any(|a| a.email == email) {
            tracing::warn!(username = %username, "sign-up rejected: email taken");
            return Err(AccountError::DuplicateAccount("email"));
        }

        let record = UserAccount {
            id: UserId::new(),
            username: username.clone(),
            email,
            nickname,
            password_hash,
            krw_asset: self.initial_asset,
            holdings: BTreeMap::new(),
            bankruptcy_count: 0,
            deleted_at: None,
            created_at: Utc::now(),
        };
        tracing::info!(username = %username, user_id = %record.id, "account registered");
        accounts.insert(username, record);
        Ok(())
    }

    fn authenticate(&self, username: &str, password: &str) -> AccountResult<Username> {
        let username = Username::parse(username).map_err(|_| AccountError::InvalidCredential)?;
        let verified = match self.credentials(&username) {
            Ok((hash, deleted)) => !deleted && verify_password(password, &hash),
            Err(AccountError::AccountNotFound) => false,
            Err(e) => return Err(e),
        };
        if !verified {
            tracing::warn!(username = %username, "login rejected");
            return Err(AccountError::InvalidCredential);
        }
        Ok(username)
    }

    fn update_password(&self, username: &Username, current: &str, new: &str) -> AccountResult<()> {
        let (stored_hash, _) = self.credentials(username)?;

        if !verify_password(current, &stored_hash) {
            tracing::warn!(username = %username, "password change rejected: current password mismatch");
            return Err(AccountError::InvalidCredential);
        }
        let new = Password::parse(new)?;
        if new.expose() == current {
            return Err(DomainError::validation("password", "must differ from the current password").into());
        }
        let new_hash = hash_password(&new).map_err(|e| AccountError::internal(e.to_string()))?;

        let mut accounts = self.write()?;
        let account = accounts.get_mut(username).ok_or(AccountError::AccountNotFound)?;
        // Another change landed while we were hashing.
        if account.password_hash != stored_hash {
            tracing::warn!(username = %username, "password change rejected: password changed concurrently");
            return Err(AccountError::InvalidCredential);
        }
        account.password_hash = new_hash;
        tracing::info!(username = %username, "password changed");
        Ok(())
    }

    fn update_nickname(&self, username: &Username, nickname: &str) -> AccountResult<()> {
        let nickname = Nickname::parse(nickname)?;
        let mut accounts = self.write()?;
        let account = accounts.get_mut(username).ok_or(AccountError::AccountNotFound)?;

        if account.nickname == nickname {
            return Err(DomainError::validation("nickname", "is the same as the current nickname").into());
        }
        tracing::info!(username = %username, from = account.nickname.as_str(), to = nickname.as_str(), "nickname changed");
        account.nickname = nickname;
        Ok(())
    }

    fn get_portfolio(&self, username: &Username) -> AccountResult<Vec<PortfolioEntry>> {
        let accounts = self.read()?;
        let account = accounts.get(username).ok_or(AccountError::AccountNotFound)?;
        Ok(account.holdings.values().cloned().collect())
    }

    fn get_user_asset(&self, username: &Username) -> AccountResult<i64> {
        let accounts = self.read()?;
        accounts
            .get(username)
            .map(|a| a.krw_asset)
            .ok_or(AccountError::AccountNotFound)
    }

    fn get_user_info(&self, username: &Username) -> AccountResult<UserInfo> {
        let accounts = self.read()?;
        accounts
            .get(username)
            .map(UserAccount::info)
            .ok_or(AccountError::AccountNotFound)
    }

    fn mark_as_deleted_user(&self, username: &Username) -> AccountResult<()> {
        let mut accounts = self.write()?;
        let account = accounts.get_mut(username).ok_or(AccountError::AccountNotFound)?;
        if account.deleted_at.is_none() {
            account.deleted_at = Some(Utc::now());
            tracing::info!(username = %username, "account marked as deleted");
        }
        Ok(())
    }

    fn bankrupt(&self, username: &Username) -> AccountResult<()> {
        let mut accounts = self.write()?;
        let account = accounts.get_mut(username).ok_or(AccountError::AccountNotFound)?;
        account.holdings.clear();
        account.krw_asset = self.initial_asset;
        account.bankruptcy_count += 1;
        tracing::info!(username = %username, count = account.bankruptcy_count, "bankruptcy processed");
        Ok(())
    }
}
