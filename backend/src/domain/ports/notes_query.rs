//! Driving port for note reads.

use async_trait::async_trait;

use crate::domain::notes::Note;
use crate::domain::{Actor, Error};

/// Domain use-case port for listing and viewing notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// Notes owned by the actor, oldest first.
    async fn list(&self, actor: &Actor) -> Result<Vec<Note>, Error>;

    /// The note addressed by `slug`. Owner only.
    async fn detail(&self, actor: &Actor, slug: &str) -> Result<Note, Error>;
}
