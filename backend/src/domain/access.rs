//! Ownership policy shared by notes and comments.
//!
//! Every detail, edit and delete action resolves the caller against the
//! record owner before touching storage:
//!
//! | actor                    | outcome                      |
//! |--------------------------|------------------------------|
//! | anonymous                | [`Access::RequireAuth`]      |
//! | authenticated, owner     | [`Access::Allow`]            |
//! | authenticated, non-owner | [`Access::Deny`]             |
//!
//! `Deny` is reported as "not found" so that non-owners cannot tell a hidden
//! record from a missing one.

use super::{Error, UserId};

/// The party performing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// No session user.
    Anonymous,
    /// A logged-in user.
    User(UserId),
}

impl Actor {
    /// Identifier of the logged-in user, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(id),
        }
    }

    /// Whether the actor is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// Return the logged-in user or an `Unauthorized` error.
    pub fn require_user(&self) -> Result<&UserId, Error> {
        self.user_id()
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl From<Option<UserId>> for Actor {
    fn from(value: Option<UserId>) -> Self {
        value.map_or(Self::Anonymous, Self::User)
    }
}

/// Outcome of [`resolve_access`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The actor owns the record.
    Allow,
    /// The actor is logged in but does not own the record.
    Deny,
    /// The actor must log in first.
    RequireAuth,
}

/// Records that belong to exactly one user.
pub trait Owned {
    /// The user allowed to read and mutate the record.
    fn owner(&self) -> &UserId;
}

/// Decide whether `actor` may act on a record owned by `owner`.
///
/// # Examples
/// ```
/// use noticeboard::domain::{Access, Actor, UserId, resolve_access};
///
/// let owner = UserId::random();
/// assert_eq!(resolve_access(&Actor::Anonymous, &owner), Access::RequireAuth);
/// assert_eq!(resolve_access(&Actor::User(owner.clone()), &owner), Access::Allow);
/// assert_eq!(resolve_access(&Actor::User(UserId::random()), &owner), Access::Deny);
/// ```
pub fn resolve_access(actor: &Actor, owner: &UserId) -> Access {
    match actor {
        Actor::Anonymous => Access::RequireAuth,
        Actor::User(id) if id == owner => Access::Allow,
        Actor::User(_) => Access::Deny,
    }
}

/// Hand `record` back when `actor` owns it, otherwise map the policy outcome
/// to an error. `label` names the record in the not-found message.
pub fn authorise<T: Owned>(actor: &Actor, record: T, label: &str) -> Result<T, Error> {
    match resolve_access(actor, record.owner()) {
        Access::Allow => Ok(record),
        Access::Deny => Err(Error::not_found(format!("{label} not found"))),
        Access::RequireAuth => Err(Error::unauthorized("login required")),
    }
}
