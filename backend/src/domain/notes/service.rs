//! Notes domain service.
//!
//! Implements [`NotesCommand`] and [`NotesQuery`] on top of a
//! [`NoteRepository`], resolving ownership before any read or write.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{Note, NoteForm, duplicate_slug_message};
use crate::domain::ports::{NoteRepository, NoteRepositoryError, NotesCommand, NotesQuery};
use crate::domain::{Actor, Error, Slug, authorise};

const LABEL: &str = "note";

/// Notes service implementing the driving ports.
#[derive(Clone)]
pub struct NotesService<R> {
    notes: Arc<R>,
}

impl<R> NotesService<R> {
    /// Create a new service over the given repository.
    pub fn new(notes: Arc<R>) -> Self {
        Self { notes }
    }
}

impl<R> NotesService<R>
where
    R: NoteRepository,
{
    fn map_repository_error(error: NoteRepositoryError) -> Error {
        match error {
            NoteRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("note repository unavailable: {message}"))
            }
            NoteRepositoryError::Query { message } => {
                Error::internal(format!("note repository error: {message}"))
            }
            NoteRepositoryError::DuplicateSlug { slug } => match Slug::new(&slug) {
                Ok(slug) => Error::field("slug", duplicate_slug_message(&slug)),
                Err(_) => Error::internal(format!("repository reported malformed slug {slug}")),
            },
            NoteRepositoryError::Missing { .. } => Error::not_found("note not found"),
        }
    }

    /// Look up `raw_slug` and check that `actor` owns the note.
    ///
    /// Anonymous actors are rejected before the lookup so the response does
    /// not depend on whether the note exists.
    async fn owned_note(&self, actor: &Actor, raw_slug: &str) -> Result<Note, Error> {
        actor.require_user()?;
        let Ok(slug) = Slug::new(raw_slug) else {
            return Err(Error::not_found("note not found"));
        };
        let note = self
            .notes
            .find_by_slug(&slug)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("note not found"))?;
        authorise(actor, note, LABEL)
    }
}

#[async_trait]
impl<R> NotesCommand for NotesService<R>
where
    R: NoteRepository,
{
    async fn create(&self, actor: &Actor, form: NoteForm) -> Result<Note, Error> {
        let author = actor.require_user()?;
        let draft = form.validate().map_err(Error::fields)?;
        let note = self
            .notes
            .insert(&draft, author)
            .await
            .map_err(Self::map_repository_error)?;
        info!(note_id = %note.id(), slug = %note.slug(), "note created");
        Ok(note)
    }

    async fn update(&self, actor: &Actor, slug: &str, form: NoteForm) -> Result<Note, Error> {
        let note = self.owned_note(actor, slug).await?;
        let draft = form.validate().map_err(Error::fields)?;
        let updated = self
            .notes
            .update(note.id(), &draft)
            .await
            .map_err(Self::map_repository_error)?;
        info!(note_id = %updated.id(), slug = %updated.slug(), "note updated");
        Ok(updated)
    }

    async fn delete(&self, actor: &Actor, slug: &str) -> Result<Note, Error> {
        let note = self.owned_note(actor, slug).await?;
        let removed = self
            .notes
            .delete(note.id())
            .await
            .map_err(Self::map_repository_error)?;
        if !removed {
            return Err(Error::not_found("note not found"));
        }
        info!(note_id = %note.id(), "note deleted");
        Ok(note)
    }
}

#[async_trait]
impl<R> NotesQuery for NotesService<R>
where
    R: NoteRepository,
{
    async fn list(&self, actor: &Actor) -> Result<Vec<Note>, Error> {
        let author = actor.require_user()?;
        let notes = self
            .notes
            .list_by_author(author)
            .await
            .map_err(Self::map_repository_error)?;
        debug!(count = notes.len(), "listed notes");
        Ok(notes)
    }

    async fn detail(&self, actor: &Actor, slug: &str) -> Result<Note, Error> {
        self.owned_note(actor, slug).await
    }
}
