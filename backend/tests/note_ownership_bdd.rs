//! Behaviour tests for note ownership.
//!
//! These scenarios drive the notes service through its driving ports and
//! confirm that owners, strangers and anonymous visitors get the outcomes
//! the access policy promises.

use std::cell::RefCell;

use noticeboard::domain::notes::{Note, NoteForm, duplicate_slug_message};
use noticeboard::domain::ports::{NotesCommand, NotesQuery};
use noticeboard::domain::{Actor, Error, ErrorCode, NotesService, UserId};
use noticeboard::outbound::memory::InMemoryNoteRepository;
use noticeboard::test_support::Scenario;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

struct OwnershipWorld {
    runtime: Runtime,
    scenario: Scenario,
    author: UserId,
    note: RefCell<Option<Note>>,
    outcome: RefCell<Option<Result<Note, Error>>>,
}

impl OwnershipWorld {
    fn new() -> Self {
        let scenario = Scenario::new();
        let author = scenario.author();
        Self {
            runtime: Runtime::new().expect("tokio runtime"),
            scenario,
            author,
            note: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    fn service(&self) -> NotesService<InMemoryNoteRepository> {
        NotesService::new(self.scenario.notes.clone())
    }

    fn slug(&self) -> String {
        self.note
            .borrow()
            .as_ref()
            .expect("a note was written")
            .slug()
            .to_string()
    }

    fn open_as(&self, actor: Actor) {
        let slug = self.slug();
        let service = self.service();
        let result = self
            .runtime
            .block_on(async { service.detail(&actor, &slug).await });
        *self.outcome.borrow_mut() = Some(result);
    }

    fn with_error<F>(&self, f: F)
    where
        F: FnOnce(&Error),
    {
        let outcome = self.outcome.borrow();
        match outcome.as_ref().expect("an action ran") {
            Ok(note) => panic!("expected a failure, got note {}", note.slug()),
            Err(error) => f(error),
        }
    }
}

#[fixture]
fn world() -> OwnershipWorld {
    OwnershipWorld::new()
}

#[given("a note titled {title} written by the author")]
fn a_note_written_by_the_author(world: &OwnershipWorld, title: String) {
    let title = title.trim_matches('"').to_owned();
    let note = world
        .runtime
        .block_on(world.scenario.note(&world.author, &title, "молоко, хлеб"));
    *world.note.borrow_mut() = Some(note);
}

#[when("the author opens the note")]
fn the_author_opens_the_note(world: &OwnershipWorld) {
    world.open_as(Actor::User(world.author.clone()));
}

#[when("another user opens the note")]
fn another_user_opens_the_note(world: &OwnershipWorld) {
    world.open_as(Actor::User(UserId::random()));
}

#[when("an anonymous visitor opens the note")]
fn an_anonymous_visitor_opens_the_note(world: &OwnershipWorld) {
    world.open_as(Actor::Anonymous);
}

#[when("the author saves another note with the same slug")]
fn the_author_saves_another_note_with_the_same_slug(world: &OwnershipWorld) {
    let form = NoteForm {
        title: "Другая заметка".to_owned(),
        text: "текст".to_owned(),
        slug: Some(world.slug()),
    };
    let actor = Actor::User(world.author.clone());
    let service = world.service();
    let result = world
        .runtime
        .block_on(async { service.create(&actor, form).await });
    *world.outcome.borrow_mut() = Some(result);
}

#[then("the note is returned")]
fn the_note_is_returned(world: &OwnershipWorld) {
    let outcome = world.outcome.borrow();
    let note = outcome
        .as_ref()
        .expect("an action ran")
        .as_ref()
        .expect("owner should see the note");
    assert_eq!(note.author(), &world.author);
    assert_eq!(note.title(), "Список покупок");
}

#[then("the note looks missing")]
fn the_note_looks_missing(world: &OwnershipWorld) {
    world.with_error(|error| assert_eq!(error.code(), ErrorCode::NotFound));
}

#[then("a login is required")]
fn a_login_is_required(world: &OwnershipWorld) {
    world.with_error(|error| assert_eq!(error.code(), ErrorCode::Unauthorized));
}

#[then("the save fails with the duplicate slug warning")]
fn the_save_fails_with_the_duplicate_slug_warning(world: &OwnershipWorld) {
    let note = world.note.borrow();
    let expected = duplicate_slug_message(note.as_ref().expect("a note was written").slug());
    world.with_error(|error| {
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.field_errors("slug"), vec![expected.as_str()]);
    });
}

#[then("the store still holds {count} note")]
fn the_store_still_holds(world: &OwnershipWorld, count: usize) {
    let stored = world.runtime.block_on(world.scenario.note_count());
    assert_eq!(stored, count);
}

#[scenario(
    path = "tests/features/note_ownership.feature",
    name = "Author reads their own note"
)]
fn author_reads_their_own_note(world: OwnershipWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/note_ownership.feature",
    name = "Another user cannot tell the note exists"
)]
fn another_user_cannot_tell_the_note_exists(world: OwnershipWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/note_ownership.feature",
    name = "Anonymous visitor is asked to log in"
)]
fn anonymous_visitor_is_asked_to_log_in(world: OwnershipWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/note_ownership.feature",
    name = "Reusing a slug is rejected"
)]
fn reusing_a_slug_is_rejected(world: OwnershipWorld) {
    drop(world);
}
