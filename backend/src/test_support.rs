//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::news::{
    Comment, CommentText, NEWS_COUNT_ON_HOME_PAGE, NewComment, NewNewsItem, NewsId, NewsItem,
};
use crate::domain::notes::{Note, NoteForm};
use crate::domain::ports::{
    AccountService, CommentRepository, NewsRepository, NoteRepository,
};
use crate::domain::{AccountsService, Credentials, NewsService, NotesService, User, UserId};
use crate::inbound::http;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::test_utils::{test_login_route, test_session_middleware};
use crate::outbound::memory::{
    InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
    InMemoryUserRepository,
};

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The backend reads files through `cap_std::fs::Dir`; these helpers let
    //! test suites write fixtures the same way.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Write bytes to a file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use noticeboard::test_support::cap_fs::write_file;
    ///
    /// let path = std::env::temp_dir().join("cap-fs-write-example.json");
    /// write_file(&path, b"[]\n")?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

/// Clock pinned to a settable instant.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Instant every [`Scenario`] clock starts at.
pub fn scenario_epoch() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).single() {
        Some(instant) => instant,
        None => panic!("scenario epoch is a valid instant"),
    }
}

/// Per-test world: in-memory stores, a pinned clock and builders for
/// authors, notes, news and comments.
///
/// Build one per test; nothing is shared between scenarios.
pub struct Scenario {
    /// Note store shared with the HTTP state.
    pub notes: Arc<InMemoryNoteRepository>,
    /// News store shared with the HTTP state.
    pub news: Arc<InMemoryNewsRepository>,
    /// Comment store shared with the HTTP state.
    pub comments: Arc<InMemoryCommentRepository>,
    /// Account store shared with the HTTP state.
    pub users: Arc<InMemoryUserRepository>,
    /// Clock stamped on comments; advance it to order a thread.
    pub clock: Arc<MutableClock>,
    page_size: usize,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    /// Empty stores and the default home page size.
    pub fn new() -> Self {
        Self {
            notes: Arc::new(InMemoryNoteRepository::new()),
            news: Arc::new(InMemoryNewsRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            clock: Arc::new(MutableClock::new(scenario_epoch())),
            page_size: NEWS_COUNT_ON_HOME_PAGE,
        }
    }

    /// Override the number of news items on the home page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Configured home page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Services over this scenario's stores.
    pub fn http_state(&self) -> HttpState {
        let notes = Arc::new(NotesService::new(self.notes.clone()));
        let news = Arc::new(
            NewsService::new(self.news.clone(), self.comments.clone(), self.clock.clone())
                .with_page_size(self.page_size),
        );
        HttpState::new(HttpStatePorts {
            notes: notes.clone(),
            notes_query: notes,
            news: news.clone(),
            comments: news,
            accounts: Arc::new(AccountsService::new(self.users.clone())),
        })
    }

    /// A fresh user id with no stored account.
    pub fn author(&self) -> UserId {
        UserId::random()
    }

    /// Register an account that can log in over HTTP.
    pub async fn account(&self, username: &str, password: &str) -> User {
        let credentials = Credentials::try_from_parts(username, password)
            .unwrap_or_else(|err| panic!("invalid scenario credentials: {err}"));
        AccountsService::new(self.users.clone())
            .signup(&credentials)
            .await
            .unwrap_or_else(|err| panic!("scenario signup failed: {err}"))
    }

    /// Store a note with a slug derived from `title`.
    pub async fn note(&self, author: &UserId, title: &str, text: &str) -> Note {
        let form = NoteForm {
            title: title.to_owned(),
            text: text.to_owned(),
            slug: None,
        };
        self.store_note(author, form).await
    }

    /// Store a note with an explicit slug.
    pub async fn note_with_slug(
        &self,
        author: &UserId,
        title: &str,
        text: &str,
        slug: &str,
    ) -> Note {
        let form = NoteForm {
            title: title.to_owned(),
            text: text.to_owned(),
            slug: Some(slug.to_owned()),
        };
        self.store_note(author, form).await
    }

    async fn store_note(&self, author: &UserId, form: NoteForm) -> Note {
        let draft = form
            .validate()
            .unwrap_or_else(|errors| panic!("invalid scenario note: {errors:?}"));
        self.notes
            .insert(&draft, author)
            .await
            .unwrap_or_else(|err| panic!("scenario note insert failed: {err}"))
    }

    /// Store a news item dated `date`.
    pub async fn news_item(&self, title: &str, date: NaiveDate) -> NewsItem {
        let item = NewNewsItem {
            title: title.to_owned(),
            text: format!("{title} text"),
            date,
        };
        self.news
            .insert(&item)
            .await
            .unwrap_or_else(|err| panic!("scenario news insert failed: {err}"))
    }

    /// Store `count` news items, one per day counting back from the epoch.
    ///
    /// Items are inserted oldest last so storage order differs from date
    /// order.
    pub async fn news_feed(&self, count: usize) -> Vec<NewsItem> {
        let today = scenario_epoch().date_naive();
        let mut items = Vec::with_capacity(count);
        for offset in 0..count {
            let days = i64::try_from(offset).unwrap_or(i64::MAX);
            let date = today - TimeDelta::days(days);
            items.push(self.news_item(&format!("Новость {offset}"), date).await);
        }
        items
    }

    /// Store a comment stamped with the clock, then move the clock on a minute.
    pub async fn comment(&self, news: NewsId, author: &UserId, text: &str) -> Comment {
        let text = CommentText::new(text)
            .unwrap_or_else(|err| panic!("invalid scenario comment: {err}"));
        let comment = NewComment {
            news,
            author: author.clone(),
            text,
            created: self.clock.utc(),
        };
        self.clock.advance_seconds(60);
        self.comments
            .insert(&comment)
            .await
            .unwrap_or_else(|err| panic!("scenario comment insert failed: {err}"))
    }

    /// Number of stored notes.
    pub async fn note_count(&self) -> usize {
        self.notes
            .count()
            .await
            .unwrap_or_else(|err| panic!("note count failed: {err}"))
    }

    /// Number of stored comments.
    pub async fn comment_count(&self) -> usize {
        self.comments
            .count()
            .await
            .unwrap_or_else(|err| panic!("comment count failed: {err}"))
    }
}

/// Application with every HTTP route, a test session and the test login
/// route from [`crate::inbound::http::test_utils`].
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(test_login_route())
        .configure(http::configure)
}
