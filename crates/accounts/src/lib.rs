//! `cowing-accounts`: the user-account service consumed by the HTTP layer.
//!
//! [`UserService`] is the collaborator contract; [`InMemoryUserService`] is a
//! process-local implementation for dev and tests.

pub mod error;
pub mod in_memory;
pub mod model;
pub mod service;

pub use error::{AccountError, AccountResult};
pub use in_memory::{DEFAULT_INITIAL_KRW_ASSET, InMemoryUserService};
pub use model::{PortfolioEntry, UserInfo};
pub use service::{NewAccount, UserService};
