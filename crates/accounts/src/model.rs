use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One coin position held by a user, valued in KRW.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    /// Market code, e.g. `KRW-BTC`.
    pub market: String,
    pub quantity: f64,
    pub average_price: i64,
    pub total_cost: i64,
}

impl PortfolioEntry {
    pub fn new(market: impl Into<String>, quantity: f64, average_price: i64) -> Self {
        Self {
            market: market.into(),
            quantity,
            average_price,
            total_cost: (quantity * average_price as f64).round() as i64,
        }
    }
}

/// Basic profile of the calling user. Returned as-is by `/infos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub username: String,
    pub email: String,
    pub nickname: String,
    /// KRW cash balance.
    pub asset: i64,
    pub bankruptcy_count: u32,
    pub created_at: DateTime<Utc>,
}
