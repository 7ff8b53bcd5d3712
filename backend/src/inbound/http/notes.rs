//! Notes HTTP handlers.
//!
//! ```text
//! GET      /notes/
//! GET/POST /notes/add/
//! GET      /notes/list/
//! GET      /notes/done/
//! GET      /notes/note/{slug}/
//! GET/POST /notes/edit/{slug}/
//! GET/POST /notes/delete/{slug}/
//! ```
//!
//! Everything except the home page requires a login; detail, edit and delete
//! additionally require ownership. Successful mutations redirect to
//! [`NOTES_DONE_PATH`].

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::notes::{Note, NoteForm};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{DeferredForm, found, submitted_form};
use crate::inbound::http::login_redirect::LoginRedirect;
use crate::inbound::http::schemas::{ErrorSchema, NoteFormSchema, NoteSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Landing page after a successful create, edit or delete.
pub const NOTES_DONE_PATH: &str = "/notes/done/";

/// Landing page payload with the main navigation targets.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotesHomeResponse {
    pub authenticated: bool,
    pub add_path: &'static str,
    pub list_path: &'static str,
}

/// Confirmation payload for [`NOTES_DONE_PATH`].
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotesDoneResponse {
    pub message: &'static str,
    pub list_path: &'static str,
}

/// Mount every notes handler under `/notes` behind [`LoginRedirect`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use noticeboard::inbound::http::notes;
///
/// let app = App::new().configure(notes::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notes")
            .wrap(LoginRedirect)
            .service(home)
            .service(add_form)
            .service(add)
            .service(list)
            .service(done)
            .service(detail)
            .service(edit_form)
            .service(edit)
            .service(delete_form)
            .service(delete),
    );
}

/// Public landing page.
#[utoipa::path(
    get,
    path = "/notes/",
    responses(
        (status = 200, description = "Landing page", body = NotesHomeResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "notesHome",
    security([])
)]
#[get("/")]
pub async fn home(session: SessionContext) -> ApiResult<web::Json<NotesHomeResponse>> {
    let actor = session.actor()?;
    Ok(web::Json(NotesHomeResponse {
        authenticated: actor.is_authenticated(),
        add_path: "/notes/add/",
        list_path: "/notes/list/",
    }))
}

/// Empty note form.
#[utoipa::path(
    get,
    path = "/notes/add/",
    responses(
        (status = 200, description = "Empty form", body = NoteFormSchema),
        (status = 302, description = "Login required")
    ),
    tags = ["notes"],
    operation_id = "noteAddForm"
)]
#[get("/add/")]
pub async fn add_form(session: SessionContext) -> ApiResult<web::Json<NoteForm>> {
    session.actor()?.require_user()?;
    Ok(web::Json(NoteForm::default()))
}

/// Create a note owned by the logged-in user.
#[utoipa::path(
    post,
    path = "/notes/add/",
    request_body = NoteFormSchema,
    responses(
        (status = 302, description = "Created; redirects to /notes/done/, or to login when anonymous"),
        (status = 400, description = "Invalid form or duplicate slug", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "noteAdd"
)]
#[post("/add/")]
pub async fn add(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: DeferredForm<NoteForm>,
) -> actix_web::Result<HttpResponse> {
    let actor = session.actor()?;
    let form = submitted_form(&actor, payload)?;
    let note = state.notes.create(&actor, form).await?;
    debug!(slug = %note.slug(), "note created over http");
    Ok(found(NOTES_DONE_PATH))
}

/// Notes owned by the logged-in user.
#[utoipa::path(
    get,
    path = "/notes/list/",
    responses(
        (status = 200, description = "Own notes, oldest first", body = [NoteSchema]),
        (status = 302, description = "Login required")
    ),
    tags = ["notes"],
    operation_id = "noteList"
)]
#[get("/list/")]
pub async fn list(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Note>>> {
    let actor = session.actor()?;
    let notes = state.notes_query.list(&actor).await?;
    Ok(web::Json(notes))
}

/// Confirmation shown after a mutation.
#[utoipa::path(
    get,
    path = "/notes/done/",
    responses(
        (status = 200, description = "Confirmation", body = NotesDoneResponse),
        (status = 302, description = "Login required")
    ),
    tags = ["notes"],
    operation_id = "noteDone"
)]
#[get("/done/")]
pub async fn done(session: SessionContext) -> ApiResult<web::Json<NotesDoneResponse>> {
    session.actor()?.require_user()?;
    Ok(web::Json(NotesDoneResponse {
        message: "Done",
        list_path: "/notes/list/",
    }))
}

/// A single note. Owner only.
#[utoipa::path(
    get,
    path = "/notes/note/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Note", body = NoteSchema),
        (status = 302, description = "Login required"),
        (status = 404, description = "Missing or not owned", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "noteDetail"
)]
#[get("/note/{slug}/")]
pub async fn detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Note>> {
    let actor = session.actor()?;
    let note = state.notes_query.detail(&actor, &path).await?;
    Ok(web::Json(note))
}

/// Edit form pre-filled with the note. Owner only.
#[utoipa::path(
    get,
    path = "/notes/edit/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Pre-filled form", body = NoteFormSchema),
        (status = 302, description = "Login required"),
        (status = 404, description = "Missing or not owned", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "noteEditForm"
)]
#[get("/edit/{slug}/")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<NoteForm>> {
    let actor = session.actor()?;
    let note = state.notes_query.detail(&actor, &path).await?;
    Ok(web::Json(NoteForm::from(&note)))
}

/// Replace a note. Owner only.
#[utoipa::path(
    post,
    path = "/notes/edit/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    request_body = NoteFormSchema,
    responses(
        (status = 302, description = "Updated; redirects to /notes/done/, or to login when anonymous"),
        (status = 400, description = "Invalid form or duplicate slug", body = ErrorSchema),
        (status = 404, description = "Missing or not owned", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "noteEdit"
)]
#[post("/edit/{slug}/")]
pub async fn edit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: DeferredForm<NoteForm>,
) -> actix_web::Result<HttpResponse> {
    let actor = session.actor()?;
    let form = submitted_form(&actor, payload)?;
    state.notes.update(&actor, &path, form).await?;
    Ok(found(NOTES_DONE_PATH))
}

/// Delete confirmation showing the note. Owner only.
#[utoipa::path(
    get,
    path = "/notes/delete/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Note about to be deleted", body = NoteSchema),
        (status = 302, description = "Login required"),
        (status = 404, description = "Missing or not owned", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "noteDeleteForm"
)]
#[get("/delete/{slug}/")]
pub async fn delete_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Note>> {
    let actor = session.actor()?;
    let note = state.notes_query.detail(&actor, &path).await?;
    Ok(web::Json(note))
}

/// Delete a note. Owner only.
#[utoipa::path(
    post,
    path = "/notes/delete/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 302, description = "Deleted; redirects to /notes/done/, or to login when anonymous"),
        (status = 404, description = "Missing or not owned", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "noteDelete"
)]
#[post("/delete/{slug}/")]
pub async fn delete(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.actor()?;
    state.notes.delete(&actor, &path).await?;
    Ok(found(NOTES_DONE_PATH))
}
