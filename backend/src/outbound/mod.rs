//! Outbound adapters implementing domain ports.
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic beyond the atomicity the
//! port contracts require.
//!
//! - **memory**: process-local repositories for notes, news, comments and
//!   accounts.

pub mod memory;
