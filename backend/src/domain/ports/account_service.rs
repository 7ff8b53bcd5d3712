//! Driving port for signup and login.
//!
//! Inbound adapters authenticate through this port without knowing how
//! passwords are hashed or stored, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, User, UserId};

/// Domain use-case port for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new account.
    async fn signup(&self, credentials: &Credentials) -> Result<User, Error>;

    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error>;
}
