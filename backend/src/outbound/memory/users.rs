//! In-memory [`UserRepository`] adapter.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::lock;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Account, Username};

/// Accounts kept in process memory, keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<Username, Account>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &Account) -> Result<(), UserPersistenceError> {
        let mut accounts = lock(&self.accounts, UserPersistenceError::query)?;
        let username = account.user().username();
        if accounts.contains_key(username) {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        accounts.insert(username.clone(), account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, UserPersistenceError> {
        let accounts = lock(&self.accounts, UserPersistenceError::query)?;
        Ok(accounts.get(username).cloned())
    }
}
