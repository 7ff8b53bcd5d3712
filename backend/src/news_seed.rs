//! Startup loading of news items from a JSON seed file.
//!
//! News items have no write endpoint; they enter the store through a seed
//! file holding a JSON array of `{title, text, date}` objects.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::news::NewNewsItem;
use crate::domain::ports::{NewsRepository, NewsRepositoryError};

/// Errors returned while seeding news items.
#[derive(Debug, Error)]
pub enum NewsSeedError {
    /// Seed file could not be read.
    #[error("failed to read news seed at {path}: {source}")]
    Read {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Seed file is not a JSON array of news items.
    #[error("news seed at {path} is malformed: {source}")]
    Parse {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// Storing an item failed.
    #[error("news seed insert failed: {0}")]
    Store(#[from] NewsRepositoryError),
}

/// Parse the seed file at `path`.
///
/// # Errors
/// [`NewsSeedError::Read`] when the file cannot be opened and
/// [`NewsSeedError::Parse`] when it is not a JSON array of news items.
pub fn load_news_seed(path: &Path) -> Result<Vec<NewNewsItem>, NewsSeedError> {
    let read_error = |source| NewsSeedError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "news seed path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
    serde_json::from_slice(&payload).map_err(|source| NewsSeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the seed file at `path` and insert every item into `repository`.
///
/// Returns the number of items inserted.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use noticeboard::news_seed::seed_news;
/// use noticeboard::outbound::memory::InMemoryNewsRepository;
///
/// # async fn run() -> Result<(), noticeboard::news_seed::NewsSeedError> {
/// let repository = InMemoryNewsRepository::new();
/// let inserted = seed_news(&repository, Path::new("news.json")).await?;
/// println!("seeded {inserted} items");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
/// Any [`NewsSeedError`]; items stored before a failing insert stay stored.
pub async fn seed_news<R>(repository: &R, path: &Path) -> Result<usize, NewsSeedError>
where
    R: NewsRepository + ?Sized,
{
    let items = load_news_seed(path)?;
    for item in &items {
        repository.insert(item).await?;
    }
    info!(path = %path.display(), count = items.len(), "news seed applied");
    Ok(items.len())
}
