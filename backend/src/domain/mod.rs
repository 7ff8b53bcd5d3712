//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities for notes, news and accounts plus
//! the services that enforce their rules. Types are immutable once built and
//! document their invariants and serde contracts in their Rustdoc.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`Actor`] and [`resolve_access`]: the ownership policy.
//! - [`notes`], [`news`], [`accounts`]: services behind the driving ports.
//! - [`ports`]: driving and driven port traits.

pub mod access;
pub mod accounts;
pub mod credentials;
pub mod error;
pub mod news;
pub mod notes;
pub mod ports;
pub mod slug;
pub mod trace_id;
pub mod user;

pub use self::access::{Access, Actor, Owned, authorise, resolve_access};
pub use self::accounts::{Account, AccountsService};
pub use self::credentials::{Credentials, CredentialsValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::news::NewsService;
pub use self::notes::NotesService;
pub use self::slug::{SLUG_MAX, Slug, SlugValidationError, slugify};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use noticeboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("note not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
