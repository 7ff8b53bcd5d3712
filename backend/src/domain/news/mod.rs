//! Public news items and their comment threads.
//!
//! News items are seeded, never edited over the API. Comments belong to the
//! user who wrote them and are listed oldest first.

mod service;
#[cfg(test)]
mod service_tests;

pub use service::NewsService;

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Owned, UserId};

/// Default number of news items shown on the home page.
pub const NEWS_COUNT_ON_HOME_PAGE: usize = 10;

/// Words that may not appear in a comment, matched case-insensitively.
pub const BAD_WORDS: [&str; 2] = ["редиска", "негодяй"];

/// Field message reported when a comment contains a banned word.
pub const BAD_WORDS_WARNING: &str = "Не ругайтесь!";

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw identifier value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id! {
    /// Storage identifier of a news item.
    NewsId
}

numeric_id! {
    /// Storage identifier of a comment.
    CommentId
}

/// News item awaiting storage, as found in a seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewNewsItem {
    /// Headline.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Publication date.
    pub date: NaiveDate,
}

/// Stored news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    id: NewsId,
    title: String,
    text: String,
    date: NaiveDate,
}

impl NewsItem {
    /// Assemble a stored item.
    pub fn new(id: NewsId, item: NewNewsItem) -> Self {
        let NewNewsItem { title, text, date } = item;
        Self {
            id,
            title,
            text,
            date,
        }
    }

    /// Storage identifier.
    pub fn id(&self) -> NewsId {
        self.id
    }

    /// Headline.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Publication date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Validation errors returned by [`CommentText::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentTextError {
    /// The text was blank.
    #[error("comment text must not be empty")]
    Empty,
    /// The text contained a word from [`BAD_WORDS`].
    #[error("{}", BAD_WORDS_WARNING)]
    BannedWord,
}

/// Comment body free of banned words.
///
/// # Examples
/// ```
/// use noticeboard::domain::news::{CommentText, CommentTextError};
///
/// assert!(CommentText::new("Отличная новость").is_ok());
/// assert_eq!(
///     CommentText::new("Какой-то НЕГОДЯЙ!").unwrap_err(),
///     CommentTextError::BannedWord,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentText(String);

impl CommentText {
    /// Validate comment text.
    pub fn new(text: impl Into<String>) -> Result<Self, CommentTextError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CommentTextError::Empty);
        }
        let lowered = text.to_lowercase();
        if BAD_WORDS.iter().any(|word| lowered.contains(word)) {
            return Err(CommentTextError::BannedWord);
        }
        Ok(Self(text))
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

impl TryFrom<String> for CommentText {
    type Error = CommentTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Comment awaiting storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// News item being discussed.
    pub news: NewsId,
    /// Comment author.
    pub author: UserId,
    /// Validated text.
    pub text: CommentText,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
}

/// Stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: CommentId,
    news: NewsId,
    author: UserId,
    text: CommentText,
    created: DateTime<Utc>,
}

impl Comment {
    /// Assemble a stored comment.
    pub fn new(id: CommentId, comment: NewComment) -> Self {
        let NewComment {
            news,
            author,
            text,
            created,
        } = comment;
        Self {
            id,
            news,
            author,
            text,
            created,
        }
    }

    /// Storage identifier.
    pub fn id(&self) -> CommentId {
        self.id
    }

    /// News item the comment belongs to.
    pub fn news(&self) -> NewsId {
        self.news
    }

    /// Comment author.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// Comment body.
    pub fn text(&self) -> &str {
        self.text.as_ref()
    }

    /// Creation timestamp.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Replace the body, keeping id, author and timestamp.
    #[must_use]
    pub fn with_text(self, text: CommentText) -> Self {
        Self { text, ..self }
    }
}

impl Owned for Comment {
    fn owner(&self) -> &UserId {
        &self.author
    }
}

/// Comment form as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentForm {
    /// Comment body.
    #[serde(default)]
    pub text: String,
}

impl From<&Comment> for CommentForm {
    fn from(comment: &Comment) -> Self {
        Self {
            text: comment.text().to_owned(),
        }
    }
}

/// News detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetail {
    /// The news item.
    pub news: NewsItem,
    /// Its comments, oldest first.
    pub comments: Vec<Comment>,
    /// Empty comment form, offered to logged-in readers only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<CommentForm>,
}
