//! Private notes owned by a single author.
//!
//! A note is addressed by its [`Slug`], which is unique across every author.
//! Only the author may read, edit or delete a note; see
//! [`crate::domain::access`].

mod service;

pub use service::NotesService;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Owned, Slug, UserId};

/// Maximum allowed length for a note title.
pub const TITLE_MAX: usize = 100;

/// Suffix appended to a slug that is already taken.
pub const DUPLICATE_SLUG_WARNING: &str =
    " - такой slug уже существует, придумайте уникальное значение!";

/// Field message reported when `slug` collides with an existing note.
///
/// # Examples
/// ```
/// use noticeboard::domain::{Slug, notes::duplicate_slug_message};
///
/// let slug = Slug::new("zagolovok").unwrap();
/// assert!(duplicate_slug_message(&slug).starts_with("zagolovok - "));
/// ```
pub fn duplicate_slug_message(slug: &Slug) -> String {
    format!("{slug}{DUPLICATE_SLUG_WARNING}")
}

/// Storage identifier of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(u64);

impl NoteId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    title: String,
    text: String,
    slug: Slug,
    author: UserId,
}

impl Note {
    /// Assemble a note from a validated draft.
    pub fn new(id: NoteId, draft: NoteDraft, author: UserId) -> Self {
        let NoteDraft { title, text, slug } = draft;
        Self {
            id,
            title,
            text,
            slug,
            author,
        }
    }

    /// Storage identifier.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Title shown in listings.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Unique slug.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Owner of the note.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// Replace the editable fields with `draft`, keeping id and author.
    #[must_use]
    pub fn revised(self, draft: NoteDraft) -> Self {
        Self::new(self.id, draft, self.author)
    }
}

impl Owned for Note {
    fn owner(&self) -> &UserId {
        &self.author
    }
}

/// Raw note form as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteForm {
    /// Note title.
    #[serde(default)]
    pub title: String,
    /// Note body.
    #[serde(default)]
    pub text: String,
    /// Optional slug; derived from the title when absent or blank.
    #[serde(default)]
    pub slug: Option<String>,
}

impl NoteForm {
    /// Validate every field, collecting one message per failing field.
    ///
    /// # Examples
    /// ```
    /// use noticeboard::domain::notes::NoteForm;
    ///
    /// let form = NoteForm {
    ///     title: "Заголовок".into(),
    ///     text: "Текст".into(),
    ///     slug: None,
    /// };
    /// let draft = form.validate().unwrap();
    /// assert_eq!(draft.slug().as_ref(), "zagolovok");
    /// ```
    pub fn validate(&self) -> Result<NoteDraft, Vec<(&'static str, String)>> {
        let mut errors = Vec::new();
        let title = self.title.trim();
        if title.is_empty() {
            errors.push(("title", "title must not be empty".to_owned()));
        } else if title.chars().count() > TITLE_MAX {
            errors.push(("title", format!("title must be at most {TITLE_MAX} characters")));
        }
        if self.text.trim().is_empty() {
            errors.push(("text", "text must not be empty".to_owned()));
        }
        let slug = match Slug::from_input(self.slug.as_deref(), title) {
            Ok(slug) => Some(slug),
            Err(err) => {
                if !title.is_empty() || has_explicit_slug(self.slug.as_deref()) {
                    errors.push(("slug", err.to_string()));
                }
                None
            }
        };

        match slug {
            Some(slug) if errors.is_empty() => Ok(NoteDraft {
                title: title.to_owned(),
                text: self.text.clone(),
                slug,
            }),
            _ => Err(errors),
        }
    }
}

fn has_explicit_slug(raw: Option<&str>) -> bool {
    raw.is_some_and(|value| !value.trim().is_empty())
}

impl From<&Note> for NoteForm {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: Some(note.slug.to_string()),
        }
    }
}

/// Validated note contents awaiting storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    text: String,
    slug: Slug,
}

impl NoteDraft {
    /// Title, trimmed.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text as submitted.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Explicit or derived slug.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }
}
