//! Driving port for the public news pages.

use async_trait::async_trait;

use crate::domain::news::{NewsDetail, NewsId, NewsItem};
use crate::domain::{Actor, Error};

/// Domain use-case port for the news home page and detail page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsQuery: Send + Sync {
    /// Newest news items, capped at the configured page size.
    async fn home_page(&self) -> Result<Vec<NewsItem>, Error>;

    /// A news item with its comment thread.
    ///
    /// The comment form is offered only when `actor` is logged in.
    async fn news_detail(&self, actor: &Actor, id: NewsId) -> Result<NewsDetail, Error>;
}
