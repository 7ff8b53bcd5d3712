//! News domain service.
//!
//! Implements [`NewsQuery`] and [`CommentsCommand`] over the news and comment
//! repositories. Comment timestamps come from the injected [`Clock`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use super::{
    Comment, CommentForm, CommentId, CommentText, NEWS_COUNT_ON_HOME_PAGE, NewComment, NewsDetail,
    NewsId, NewsItem,
};
use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, CommentsCommand, NewsQuery, NewsRepository,
    NewsRepositoryError,
};
use crate::domain::{Actor, Error, authorise};

const LABEL: &str = "comment";

/// News service implementing the driving ports.
#[derive(Clone)]
pub struct NewsService<N, C> {
    news: Arc<N>,
    comments: Arc<C>,
    clock: Arc<dyn Clock>,
    page_size: usize,
}

impl<N, C> NewsService<N, C> {
    /// Create a new service showing [`NEWS_COUNT_ON_HOME_PAGE`] items per page.
    pub fn new(news: Arc<N>, comments: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            news,
            comments,
            clock,
            page_size: NEWS_COUNT_ON_HOME_PAGE,
        }
    }

    /// Override the home page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

impl<N, C> NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    fn map_news_error(error: NewsRepositoryError) -> Error {
        match error {
            NewsRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("news repository unavailable: {message}"))
            }
            NewsRepositoryError::Query { message } => {
                Error::internal(format!("news repository error: {message}"))
            }
        }
    }

    fn map_comment_error(error: CommentRepositoryError) -> Error {
        match error {
            CommentRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("comment repository unavailable: {message}"))
            }
            CommentRepositoryError::Query { message } => {
                Error::internal(format!("comment repository error: {message}"))
            }
            CommentRepositoryError::Missing { .. } => Error::not_found("comment not found"),
        }
    }

    fn validate_text(text: &str) -> Result<CommentText, Error> {
        CommentText::new(text).map_err(|err| Error::field("text", err.to_string()))
    }

    async fn existing_news(&self, id: NewsId) -> Result<NewsItem, Error> {
        self.news
            .find_by_id(id)
            .await
            .map_err(Self::map_news_error)?
            .ok_or_else(|| Error::not_found("news not found"))
    }

    /// Load comment `id` and check that `actor` wrote it.
    async fn owned_comment(&self, actor: &Actor, id: CommentId) -> Result<Comment, Error> {
        actor.require_user()?;
        let comment = self
            .comments
            .find_by_id(id)
            .await
            .map_err(Self::map_comment_error)?
            .ok_or_else(|| Error::not_found("comment not found"))?;
        authorise(actor, comment, LABEL)
    }
}

#[async_trait]
impl<N, C> NewsQuery for NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn home_page(&self) -> Result<Vec<NewsItem>, Error> {
        let items = self
            .news
            .latest(self.page_size)
            .await
            .map_err(Self::map_news_error)?;
        debug!(count = items.len(), page_size = self.page_size, "loaded home page");
        Ok(items)
    }

    async fn news_detail(&self, actor: &Actor, id: NewsId) -> Result<NewsDetail, Error> {
        let news = self.existing_news(id).await?;
        let comments = self
            .comments
            .list_for_news(id)
            .await
            .map_err(Self::map_comment_error)?;
        let form = actor.is_authenticated().then(CommentForm::default);
        Ok(NewsDetail {
            news,
            comments,
            form,
        })
    }
}

#[async_trait]
impl<N, C> CommentsCommand for NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn submit(&self, actor: &Actor, news: NewsId, text: &str) -> Result<Comment, Error> {
        let author = actor.require_user()?;
        self.existing_news(news).await?;
        let text = Self::validate_text(text)?;
        let comment = self
            .comments
            .insert(&NewComment {
                news,
                author: author.clone(),
                text,
                created: self.clock.utc(),
            })
            .await
            .map_err(Self::map_comment_error)?;
        info!(comment_id = %comment.id(), news_id = %news, "comment created");
        Ok(comment)
    }

    async fn comment_for_edit(&self, actor: &Actor, id: CommentId) -> Result<Comment, Error> {
        self.owned_comment(actor, id).await
    }

    async fn update(&self, actor: &Actor, id: CommentId, text: &str) -> Result<Comment, Error> {
        let comment = self.owned_comment(actor, id).await?;
        let text = Self::validate_text(text)?;
        let updated = self
            .comments
            .update_text(comment.id(), &text)
            .await
            .map_err(Self::map_comment_error)?;
        info!(comment_id = %updated.id(), "comment updated");
        Ok(updated)
    }

    async fn delete(&self, actor: &Actor, id: CommentId) -> Result<Comment, Error> {
        let comment = self.owned_comment(actor, id).await?;
        let removed = self
            .comments
            .delete(comment.id())
            .await
            .map_err(Self::map_comment_error)?;
        if !removed {
            return Err(Error::not_found("comment not found"));
        }
        info!(comment_id = %comment.id(), "comment deleted");
        Ok(comment)
    }
}
