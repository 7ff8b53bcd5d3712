//! Builders wiring storage adapters into the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use noticeboard::domain::{AccountsService, NewsService, NotesService};
use noticeboard::inbound::http::state::{HttpState, HttpStatePorts};
use noticeboard::outbound::memory::{
    InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
    InMemoryUserRepository,
};

/// Storage adapters shared by every worker.
#[derive(Clone, Default)]
pub struct AppStores {
    /// Notes of every author.
    pub notes: Arc<InMemoryNoteRepository>,
    /// News items; filled by the startup seed.
    pub news: Arc<InMemoryNewsRepository>,
    /// Comments on news items.
    pub comments: Arc<InMemoryCommentRepository>,
    /// Registered accounts.
    pub users: Arc<InMemoryUserRepository>,
}

/// Build the shared HTTP state over `stores`.
pub(super) fn build_http_state(stores: &AppStores, news_page_size: usize) -> web::Data<HttpState> {
    let notes = Arc::new(NotesService::new(stores.notes.clone()));
    let news = Arc::new(
        NewsService::new(
            stores.news.clone(),
            stores.comments.clone(),
            Arc::new(DefaultClock),
        )
        .with_page_size(news_page_size),
    );

    web::Data::new(HttpState::new(HttpStatePorts {
        notes: notes.clone(),
        notes_query: notes,
        news: news.clone(),
        comments: news,
        accounts: Arc::new(AccountsService::new(stores.users.clone())),
    }))
}
