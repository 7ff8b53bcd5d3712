//! Port for news item persistence.

use async_trait::async_trait;

use crate::domain::news::{NewNewsItem, NewsId, NewsItem};

use super::define_port_error;

define_port_error! {
    /// Errors raised by news repository adapters.
    pub enum NewsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "news repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "news repository query failed: {message}",
    }
}

/// Port for news storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Store a news item and return it with its assigned id.
    async fn insert(&self, item: &NewNewsItem) -> Result<NewsItem, NewsRepositoryError>;

    /// Fetch a news item by id.
    async fn find_by_id(&self, id: NewsId) -> Result<Option<NewsItem>, NewsRepositoryError>;

    /// At most `limit` items ordered by date, newest first.
    ///
    /// Items sharing a date keep insertion order.
    async fn latest(&self, limit: usize) -> Result<Vec<NewsItem>, NewsRepositoryError>;

    /// Number of stored news items.
    async fn count(&self) -> Result<usize, NewsRepositoryError>;
}
