//! Account registration and password login.
//!
//! Passwords are stored as Argon2 PHC strings. The plain-text password only
//! lives inside [`Credentials`], which zeroises it on drop.

use std::fmt;
use std::sync::Arc;

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{AccountService, UserPersistenceError, UserRepository};
use super::{Credentials, Error, User, UserId};

/// Stored account: the public user plus its password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    user: User,
    password_hash: String,
}

impl Account {
    /// Pair a user with an Argon2 PHC hash.
    pub fn new(user: User, password_hash: impl Into<String>) -> Self {
        Self {
            user,
            password_hash: password_hash.into(),
        }
    }

    /// Public user record.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Argon2 PHC string.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("user", &self.user)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Hash `password` with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| Error::internal(format!("failed to hash password: {err}")))
}

fn password_matches(password: &str, stored: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(stored)
        .map_err(|err| Error::internal(format!("stored password hash is malformed: {err}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Account service implementing [`AccountService`].
#[derive(Clone)]
pub struct AccountsService<U> {
    users: Arc<U>,
}

impl<U> AccountsService<U> {
    /// Create a new service over the given repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> AccountsService<U>
where
    U: UserRepository,
{
    fn map_repository_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateUsername { .. } => {
                Error::field("username", "a user with that username already exists")
            }
        }
    }
}

#[async_trait]
impl<U> AccountService for AccountsService<U>
where
    U: UserRepository,
{
    async fn signup(&self, credentials: &Credentials) -> Result<User, Error> {
        let user = User::new(UserId::random(), credentials.username().clone());
        let account = Account::new(user.clone(), hash_password(credentials.password())?);
        self.users
            .insert(&account)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %user.id(), username = %user.username(), "account created");
        Ok(user)
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let account = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(Self::map_repository_error)?;
        let Some(account) = account else {
            warn!(username = %credentials.username(), "login for unknown username");
            return Err(Error::unauthorized("invalid credentials"));
        };
        if !password_matches(credentials.password(), account.password_hash())? {
            warn!(user_id = %account.user().id(), "login with wrong password");
            return Err(Error::unauthorized("invalid credentials"));
        }
        Ok(account.user().id().clone())
    }
}
