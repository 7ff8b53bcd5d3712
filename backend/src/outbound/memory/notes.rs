//! In-memory [`NoteRepository`] adapter.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Table, lock};
use crate::domain::notes::{Note, NoteDraft, NoteId};
use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{Slug, UserId};

/// Notes kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    table: Mutex<Table<Note>>,
}

impl InMemoryNoteRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_taken(rows: &[Note], slug: &Slug, except: Option<NoteId>) -> bool {
    rows.iter()
        .any(|note| note.slug() == slug && Some(note.id()) != except)
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn insert(
        &self,
        draft: &NoteDraft,
        author: &UserId,
    ) -> Result<Note, NoteRepositoryError> {
        let mut table = lock(&self.table, NoteRepositoryError::query)?;
        if slug_taken(&table.rows, draft.slug(), None) {
            return Err(NoteRepositoryError::duplicate_slug(draft.slug().as_ref()));
        }
        let note = Note::new(
            NoteId::new(table.allocate_id()),
            draft.clone(),
            author.clone(),
        );
        table.rows.push(note.clone());
        Ok(note)
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NoteRepositoryError> {
        let table = lock(&self.table, NoteRepositoryError::query)?;
        Ok(table.rows.iter().find(|note| note.slug() == slug).cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        let table = lock(&self.table, NoteRepositoryError::query)?;
        Ok(table
            .rows
            .iter()
            .filter(|note| note.author() == author)
            .cloned()
            .collect())
    }

    async fn update(&self, id: NoteId, draft: &NoteDraft) -> Result<Note, NoteRepositoryError> {
        let mut table = lock(&self.table, NoteRepositoryError::query)?;
        if slug_taken(&table.rows, draft.slug(), Some(id)) {
            return Err(NoteRepositoryError::duplicate_slug(draft.slug().as_ref()));
        }
        let slot = table
            .rows
            .iter_mut()
            .find(|note| note.id() == id)
            .ok_or_else(|| NoteRepositoryError::missing(id.get()))?;
        let updated = slot.clone().revised(draft.clone());
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError> {
        let mut table = lock(&self.table, NoteRepositoryError::query)?;
        let before = table.rows.len();
        table.rows.retain(|note| note.id() != id);
        Ok(table.rows.len() != before)
    }

    async fn count(&self) -> Result<usize, NoteRepositoryError> {
        let table = lock(&self.table, NoteRepositoryError::query)?;
        Ok(table.rows.len())
    }
}
