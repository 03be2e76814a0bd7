//! Runtime configuration, read from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::Duration;
use thiserror::Error;

use cowing_accounts::DEFAULT_INITIAL_KRW_ASSET;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_JWT_SECRET: &str = "dev-secret";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {key}={value:?}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

#[derive(Clone)]
pub struct ApiConfig {
    bind_addr: SocketAddr,
    jwt_secret: String,
    token_ttl: Duration,
    initial_krw_asset: i64,
}

impl ApiConfig {
    /// Load from the process environment.
    ///
    /// - `BIND_ADDR` (default `0.0.0.0:8080`)
    /// - `JWT_SECRET` (default insecure dev secret)
    /// - `TOKEN_TTL_MINUTES` (default 60)
    /// - `INITIAL_KRW_ASSET` (default 100,000,000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup (tests, alternate sources).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|e: std::net::AddrParseError| invalid("BIND_ADDR", &raw, e.to_string()))?,
            None => DEFAULT_BIND_ADDR,
        };

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if secret.trim().is_empty() => {
                return Err(invalid("JWT_SECRET", "", "must not be empty"));
            }
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let ttl_minutes = match lookup("TOKEN_TTL_MINUTES") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(v) if v > 0 => v,
                Ok(_) => return Err(invalid("TOKEN_TTL_MINUTES", &raw, "must be positive")),
                Err(e) => return Err(invalid("TOKEN_TTL_MINUTES", &raw, e.to_string())),
            },
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let initial_krw_asset = match lookup("INITIAL_KRW_ASSET") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(v) if v >= 0 => v,
                Ok(_) => return Err(invalid("INITIAL_KRW_ASSET", &raw, "must not be negative")),
                Err(e) => return Err(invalid("INITIAL_KRW_ASSET", &raw, e.to_string())),
            },
            None => DEFAULT_INITIAL_KRW_ASSET,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            token_ttl: Duration::minutes(ttl_minutes),
            initial_krw_asset,
        })
    }

    /// Config for in-process servers (tests): ephemeral port, fixed secret.
    pub fn for_tests(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
            initial_krw_asset: DEFAULT_INITIAL_KRW_ASSET,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    pub fn initial_krw_asset(&self) -> i64 {
        self.initial_krw_asset
    }
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"***")
            .field("token_ttl_minutes", &self.token_ttl.num_minutes())
            .field("initial_krw_asset", &self.initial_krw_asset)
            .finish()
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}
