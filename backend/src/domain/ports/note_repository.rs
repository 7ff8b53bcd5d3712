//! Port for note persistence.
//!
//! Adapters own slug uniqueness: [`NoteRepository::insert`] and
//! [`NoteRepository::update`] must check and write atomically so two
//! concurrent submissions cannot both claim one slug.

use async_trait::async_trait;

use crate::domain::notes::{Note, NoteDraft, NoteId};
use crate::domain::{Slug, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by note repository adapters.
    pub enum NoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "note repository query failed: {message}",
        /// Another note already uses the slug.
        DuplicateSlug { slug: String } =>
            "note slug already taken: {slug}",
        /// The note disappeared before the mutation ran.
        Missing { id: u64 } =>
            "note {id} does not exist",
    }
}

/// Port for note storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Store a new note for `author` and return it with its assigned id.
    ///
    /// Fails with [`NoteRepositoryError::DuplicateSlug`] when any note already
    /// uses the draft slug; nothing is stored in that case.
    async fn insert(&self, draft: &NoteDraft, author: &UserId)
    -> Result<Note, NoteRepositoryError>;

    /// Fetch a note by slug regardless of author.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NoteRepositoryError>;

    /// Notes written by `author`, oldest first.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Replace the editable fields of note `id`.
    ///
    /// The slug may stay unchanged; it must not collide with any other note.
    async fn update(&self, id: NoteId, draft: &NoteDraft) -> Result<Note, NoteRepositoryError>;

    /// Delete note `id`. Returns `Ok(false)` when it did not exist.
    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError>;

    /// Number of stored notes across every author.
    async fn count(&self) -> Result<usize, NoteRepositoryError>;
}
