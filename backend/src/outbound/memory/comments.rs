//! In-memory [`CommentRepository`] adapter.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Table, lock};
use crate::domain::news::{Comment, CommentId, CommentText, NewComment, NewsId};
use crate::domain::ports::{CommentRepository, CommentRepositoryError};

/// Comments kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    table: Mutex<Table<Comment>>,
}

impl InMemoryCommentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut table = lock(&self.table, CommentRepositoryError::query)?;
        let stored = Comment::new(CommentId::new(table.allocate_id()), comment.clone());
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let table = lock(&self.table, CommentRepositoryError::query)?;
        Ok(table.rows.iter().find(|comment| comment.id() == id).cloned())
    }

    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let table = lock(&self.table, CommentRepositoryError::query)?;
        let mut thread: Vec<Comment> = table
            .rows
            .iter()
            .filter(|comment| comment.news() == news)
            .cloned()
            .collect();
        thread.sort_by_key(|comment| (comment.created(), comment.id()));
        Ok(thread)
    }

    async fn update_text(
        &self,
        id: CommentId,
        text: &CommentText,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut table = lock(&self.table, CommentRepositoryError::query)?;
        let slot = table
            .rows
            .iter_mut()
            .find(|comment| comment.id() == id)
            .ok_or_else(|| CommentRepositoryError::missing(id.get()))?;
        let updated = slot.clone().with_text(text.clone());
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut table = lock(&self.table, CommentRepositoryError::query)?;
        let before = table.rows.len();
        table.rows.retain(|comment| comment.id() != id);
        Ok(table.rows.len() != before)
    }

    async fn count(&self) -> Result<usize, CommentRepositoryError> {
        let table = lock(&self.table, CommentRepositoryError::query)?;
        Ok(table.rows.len())
    }
}
