//! In-memory [`NewsRepository`] adapter.

use std::cmp::Reverse;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Table, lock};
use crate::domain::news::{NewNewsItem, NewsId, NewsItem};
use crate::domain::ports::{NewsRepository, NewsRepositoryError};

/// News items kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryNewsRepository {
    table: Mutex<Table<NewsItem>>,
}

impl InMemoryNewsRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsRepository for InMemoryNewsRepository {
    async fn insert(&self, item: &NewNewsItem) -> Result<NewsItem, NewsRepositoryError> {
        let mut table = lock(&self.table, NewsRepositoryError::query)?;
        let stored = NewsItem::new(NewsId::new(table.allocate_id()), item.clone());
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: NewsId) -> Result<Option<NewsItem>, NewsRepositoryError> {
        let table = lock(&self.table, NewsRepositoryError::query)?;
        Ok(table.rows.iter().find(|item| item.id() == id).cloned())
    }

    async fn latest(&self, limit: usize) -> Result<Vec<NewsItem>, NewsRepositoryError> {
        let table = lock(&self.table, NewsRepositoryError::query)?;
        let mut items = table.rows.clone();
        // Stable sort keeps insertion order within a date.
        items.sort_by_key(|item| Reverse(item.date()));
        items.truncate(limit);
        Ok(items)
    }

    async fn count(&self) -> Result<usize, NewsRepositoryError> {
        let table = lock(&self.table, NewsRepositoryError::query)?;
        Ok(table.rows.len())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory news store.
    use super::*;
    use chrono::{Days, NaiveDate};
    use rstest::rstest;

    fn item(title: &str, date: NaiveDate) -> NewNewsItem {
        NewNewsItem {
            title: title.to_owned(),
            text: "Просто текст.".to_owned(),
            date,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn latest_orders_newest_first_and_caps_length() {
        let repo = InMemoryNewsRepository::new();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        for offset in 0..12_u64 {
            let date = today
                .checked_sub_days(Days::new(offset))
                .expect("date in range");
            repo.insert(&item(&format!("Новость {offset}"), date))
                .await
                .expect("insert");
        }

        let page = repo.latest(10).await.expect("latest");

        assert_eq!(page.len(), 10);
        assert_eq!(page.first().map(NewsItem::date), Some(today));
        assert!(page.windows(2).all(|pair| match pair {
            [newer, older] => newer.date() >= older.date(),
            _ => true,
        }));
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_id_returns_inserted_item() {
        let repo = InMemoryNewsRepository::new();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        let stored = repo.insert(&item("Заголовок", date)).await.expect("insert");

        let found = repo.find_by_id(stored.id()).await.expect("lookup");

        assert_eq!(found, Some(stored));
        assert_eq!(repo.find_by_id(NewsId::new(99)).await.expect("lookup"), None);
    }
}
