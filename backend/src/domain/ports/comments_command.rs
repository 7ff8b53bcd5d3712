//! Driving port for comment mutations.

use async_trait::async_trait;

use crate::domain::news::{Comment, CommentId, NewsId};
use crate::domain::{Actor, Error};

/// Domain use-case port for the comment thread.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Post `text` under news item `news`. Requires a logged-in actor.
    async fn submit(&self, actor: &Actor, news: NewsId, text: &str) -> Result<Comment, Error>;

    /// Load a comment for its edit form. Owner only.
    async fn comment_for_edit(&self, actor: &Actor, id: CommentId) -> Result<Comment, Error>;

    /// Replace the text of a comment. Owner only.
    async fn update(&self, actor: &Actor, id: CommentId, text: &str) -> Result<Comment, Error>;

    /// Delete a comment and return it. Owner only.
    async fn delete(&self, actor: &Actor, id: CommentId) -> Result<Comment, Error>;
}
