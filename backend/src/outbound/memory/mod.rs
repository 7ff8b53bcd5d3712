//! In-process storage adapters.
//!
//! Each repository keeps its rows behind one [`std::sync::Mutex`], so a
//! uniqueness check and the write that follows happen under the same lock.
//! Identifiers are assigned sequentially from 1 and never reused.

mod comments;
mod news;
mod notes;
mod users;

pub use comments::InMemoryCommentRepository;
pub use news::InMemoryNewsRepository;
pub use notes::InMemoryNoteRepository;
pub use users::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

/// Rows plus the next identifier to hand out.
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Lock `mutex`, reporting poisoning as `message` through `on_poison`.
fn lock<'a, T, E>(
    mutex: &'a Mutex<T>,
    on_poison: impl FnOnce(&'static str) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    mutex
        .lock()
        .map_err(|_| on_poison("storage lock poisoned"))
}
