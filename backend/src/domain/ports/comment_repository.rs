//! Port for comment persistence.

use async_trait::async_trait;

use crate::domain::news::{Comment, CommentId, CommentText, NewComment, NewsId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "comment repository query failed: {message}",
        /// The comment disappeared before the mutation ran.
        Missing { id: u64 } =>
            "comment {id} does not exist",
    }
}

/// Port for comment storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Store a comment and return it with its assigned id.
    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError>;

    /// Fetch a comment by id.
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Comments on `news`, ordered by creation time then id.
    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Replace the text of comment `id`, keeping its timestamp.
    async fn update_text(
        &self,
        id: CommentId,
        text: &CommentText,
    ) -> Result<Comment, CommentRepositoryError>;

    /// Delete comment `id`. Returns `Ok(false)` when it did not exist.
    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError>;

    /// Number of stored comments across every news item.
    async fn count(&self) -> Result<usize, CommentRepositoryError>;
}
