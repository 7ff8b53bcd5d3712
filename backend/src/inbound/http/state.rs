//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, CommentsCommand, NewsQuery, NotesCommand, NotesQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub notes: Arc<dyn NotesCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
    pub news: Arc<dyn NewsQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub accounts: Arc<dyn AccountService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub notes: Arc<dyn NotesCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
    pub news: Arc<dyn NewsQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub accounts: Arc<dyn AccountService>,
}

impl HttpState {
    /// Construct state from the port bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use noticeboard::domain::{AccountsService, NewsService, NotesService};
    /// use noticeboard::inbound::http::state::{HttpState, HttpStatePorts};
    /// use noticeboard::outbound::memory::{
    ///     InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
    ///     InMemoryUserRepository,
    /// };
    ///
    /// let notes = Arc::new(NotesService::new(Arc::new(InMemoryNoteRepository::default())));
    /// let news = Arc::new(NewsService::new(
    ///     Arc::new(InMemoryNewsRepository::default()),
    ///     Arc::new(InMemoryCommentRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     notes: notes.clone(),
    ///     notes_query: notes,
    ///     news: news.clone(),
    ///     comments: news,
    ///     accounts: Arc::new(AccountsService::new(Arc::new(
    ///         InMemoryUserRepository::default(),
    ///     ))),
    /// });
    /// let _ = state.notes.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            notes,
            notes_query,
            news,
            comments,
            accounts,
        } = ports;
        Self {
            notes,
            notes_query,
            news,
            comments,
            accounts,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
