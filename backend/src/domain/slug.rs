//! URL-safe note identifiers.
//!
//! Slugs are non-empty strings of ASCII letters, digits, hyphens and
//! underscores, at most [`SLUG_MAX`] characters long. [`slugify`] derives one
//! from a free-form title, transliterating Cyrillic into Latin first.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum allowed length for a slug.
pub const SLUG_MAX: usize = 100;

/// Validation errors returned by [`Slug::new`] and [`Slug::from_title`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugValidationError {
    /// The slug was blank.
    #[error("slug must not be empty")]
    Empty,
    /// The slug exceeded [`SLUG_MAX`] characters.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// The slug contained characters other than letters, digits, `-` or `_`.
    #[error("slug may only contain latin letters, digits, hyphens and underscores")]
    InvalidCharacters,
    /// Nothing usable was left after slugifying the title.
    #[error("a slug cannot be derived from this title; please provide one")]
    Underivable,
}

/// Validated slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate an explicitly supplied slug.
    pub fn new(value: impl AsRef<str>) -> Result<Self, SlugValidationError> {
        let value = value.as_ref();
        if value.trim().is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if value.chars().count() > SLUG_MAX {
            return Err(SlugValidationError::TooLong { max: SLUG_MAX });
        }
        if !value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
        {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(value.to_owned()))
    }

    /// Derive a slug from a title, truncated to [`SLUG_MAX`] characters.
    ///
    /// # Examples
    /// ```
    /// use noticeboard::domain::Slug;
    ///
    /// let slug = Slug::from_title("Новый заголовок").unwrap();
    /// assert_eq!(slug.as_ref(), "novyj-zagolovok");
    /// ```
    pub fn from_title(title: &str) -> Result<Self, SlugValidationError> {
        let derived: String = slugify(title).chars().take(SLUG_MAX).collect();
        let derived = derived.trim_end_matches('-');
        if derived.is_empty() {
            return Err(SlugValidationError::Underivable);
        }
        Self::new(derived)
    }

    /// Use `explicit` when it is non-blank, otherwise derive from `title`.
    pub fn from_input(explicit: Option<&str>, title: &str) -> Result<Self, SlugValidationError> {
        match explicit.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => Self::new(value),
            None => Self::from_title(title),
        }
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lowercase, transliterate and hyphenate `input`.
///
/// Runs of whitespace and hyphens collapse into one `-`, `&` reads as "and",
/// Cyrillic letters are transliterated, and any other symbol is dropped.
/// The result carries no leading or trailing hyphen and is not truncated.
///
/// # Examples
/// ```
/// use noticeboard::domain::slugify;
///
/// assert_eq!(slugify("Заголовок"), "zagolovok");
/// assert_eq!(slugify("Tom & Jerry!"), "tom-and-jerry");
/// ```
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase().replace("&amp;", " and ").replace('&', " and ");
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
            continue;
        }
        let Some(piece) = transliterate(ch) else {
            continue;
        };
        if piece.is_empty() {
            continue;
        }
        if pending_hyphen && !slug.is_empty() {
            slug.push('-');
        }
        pending_hyphen = false;
        piece.push_onto(&mut slug);
    }

    slug
}

/// Latin rendering of a single lowercase character.
#[derive(Debug, Clone, Copy)]
enum Piece {
    Kept(char),
    Mapped(&'static str),
}

impl Piece {
    const fn is_empty(self) -> bool {
        matches!(self, Self::Mapped(text) if text.is_empty())
    }

    fn push_onto(self, out: &mut String) {
        match self {
            Self::Kept(ch) => out.push(ch),
            Self::Mapped(text) => out.push_str(text),
        }
    }
}

/// `None` when the character must be dropped.
fn transliterate(ch: char) -> Option<Piece> {
    let mapped = match ch {
        'a'..='z' | '0'..='9' | '_' => return Some(Piece::Kept(ch)),
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' | 'ґ' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'є' => "ye",
        'ж' => "zh",
        'з' => "z",
        'и' | 'і' => "i",
        'ї' => "yi",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(Piece::Mapped(mapped))
}
