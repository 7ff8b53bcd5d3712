//! Driving port for note mutations.
//!
//! Inbound adapters call this port with the request [`Actor`] and the raw
//! form; ownership and validation happen behind it.

use async_trait::async_trait;

use crate::domain::notes::{Note, NoteForm};
use crate::domain::{Actor, Error};

/// Domain use-case port for creating, editing and deleting notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesCommand: Send + Sync {
    /// Create a note owned by the actor.
    async fn create(&self, actor: &Actor, form: NoteForm) -> Result<Note, Error>;

    /// Replace the note addressed by `slug`. Owner only.
    async fn update(&self, actor: &Actor, slug: &str, form: NoteForm) -> Result<Note, Error>;

    /// Delete the note addressed by `slug` and return it. Owner only.
    async fn delete(&self, actor: &Actor, slug: &str) -> Result<Note, Error>;
}
