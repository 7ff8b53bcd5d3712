//! News HTTP handlers.
//!
//! ```text
//! GET             /news/
//! GET/POST        /news/{id}/
//! GET/POST        /news/edit_comment/{id}/
//! GET/POST/DELETE /news/delete_comment/{id}/
//! ```
//!
//! Reading is public. Posting a comment needs a login; editing and deleting
//! one is reserved to its author. Successful comment mutations redirect to
//! the thread anchor on the news page.

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::news::{Comment, CommentForm, CommentId, NewsDetail, NewsId, NewsItem};
use crate::domain::ports::CommentsCommand;
use crate::domain::{Actor, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{DeferredForm, found, submitted_form};
use crate::inbound::http::login_redirect::LoginRedirect;
use crate::inbound::http::schemas::{
    CommentFormSchema, CommentSchema, ErrorSchema, NewsDetailSchema, NewsItemSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Location of the comment thread for `news`.
///
/// # Examples
/// ```
/// use noticeboard::domain::news::NewsId;
/// use noticeboard::inbound::http::news::comments_anchor;
///
/// assert_eq!(comments_anchor(NewsId::new(7)), "/news/7/#comments");
/// ```
pub fn comments_anchor(news: NewsId) -> String {
    format!("/news/{news}/#comments")
}

/// Mount every news handler under `/news` behind [`LoginRedirect`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use noticeboard::inbound::http::news;
///
/// let app = App::new().configure(news::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/news")
            .wrap(LoginRedirect)
            .service(home)
            .service(detail)
            .service(submit_comment)
            .service(edit_comment_form)
            .service(edit_comment)
            .service(delete_comment_form)
            .service(delete_comment)
            .service(delete_comment_with_delete),
    );
}

/// Newest news items.
#[utoipa::path(
    get,
    path = "/news/",
    responses(
        (status = 200, description = "Newest items first", body = [NewsItemSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["news"],
    operation_id = "newsHome",
    security([])
)]
#[get("/")]
pub async fn home(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<NewsItem>>> {
    let items = state.news.home_page().await?;
    Ok(web::Json(items))
}

/// A news item with its comments.
///
/// The empty comment form is included for logged-in readers only.
#[utoipa::path(
    get,
    path = "/news/{id}/",
    params(("id" = u64, Path, description = "News id")),
    responses(
        (status = 200, description = "News item and comment thread", body = NewsDetailSchema),
        (status = 404, description = "Unknown news item", body = ErrorSchema)
    ),
    tags = ["news"],
    operation_id = "newsDetail",
    security([])
)]
#[get("/{id}/")]
pub async fn detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<NewsDetail>> {
    let actor = session.actor()?;
    let page = state
        .news
        .news_detail(&actor, NewsId::new(path.into_inner()))
        .await?;
    Ok(web::Json(page))
}

/// Post a comment under a news item.
#[utoipa::path(
    post,
    path = "/news/{id}/",
    params(("id" = u64, Path, description = "News id")),
    request_body = CommentFormSchema,
    responses(
        (status = 302, description = "Posted; redirects to the thread, or to login when anonymous"),
        (status = 400, description = "Blank text or banned word", body = ErrorSchema),
        (status = 404, description = "Unknown news item", body = ErrorSchema)
    ),
    tags = ["news"],
    operation_id = "commentSubmit"
)]
#[post("/{id}/")]
pub async fn submit_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
    payload: DeferredForm<CommentForm>,
) -> actix_web::Result<HttpResponse> {
    let actor = session.actor()?;
    let form = submitted_form(&actor, payload)?;
    let comment = state
        .comments
        .submit(&actor, NewsId::new(path.into_inner()), &form.text)
        .await?;
    Ok(found(comments_anchor(comment.news())))
}

/// Edit form pre-filled with the comment. Author only.
#[utoipa::path(
    get,
    path = "/news/edit_comment/{id}/",
    params(("id" = u64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Pre-filled form", body = CommentFormSchema),
        (status = 302, description = "Login required"),
        (status = 404, description = "Missing or not owned", body = ErrorSchema)
    ),
    tags = ["news"],
    operation_id = "commentEditForm"
)]
#[get("/edit_comment/{id}/")]
pub async fn edit_comment_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<CommentForm>> {
    let actor = session.actor()?;
    let comment = state
        .comments
        .comment_for_edit(&actor, CommentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(CommentForm::from(&comment)))
}

/// Replace the text of a comment. Author only.
#[utoipa::path(
    post,
    path = "/news/edit_comment/{id}/",
    params(("id" = u64, Path, description = "Comment id")),
    request_body = CommentFormSchema,
    responses(
        (status = 302, description = "Updated; redirects to the thread, or to login when anonymous"),
        (status = 400, description = "Blank text or banned word", body = ErrorSchema),
        (status = 404, description = "Missing or not owned", body = ErrorSchema)
    ),
    tags = ["news"],
    operation_id = "commentEdit"
)]
#[post("/edit_comment/{id}/")]
pub async fn edit_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
    payload: DeferredForm<CommentForm>,
) -> actix_web::Result<HttpResponse> {
    let actor = session.actor()?;
    let form = submitted_form(&actor, payload)?;
    let comment = state
        .comments
        .update(&actor, CommentId::new(path.into_inner()), &form.text)
        .await?;
    Ok(found(comments_anchor(comment.news())))
}

/// Delete confirmation showing the comment. Author only.
#[utoipa::path(
    get,
    path = "/news/delete_comment/{id}/",
    params(("id" = u64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment about to be deleted", body = CommentSchema),
        (status = 302, description = "Login required"),
        (status = 404, description = "Missing or not owned", body = ErrorSchema)
    ),
    tags = ["news"],
    operation_id = "commentDeleteForm"
)]
#[get("/delete_comment/{id}/")]
pub async fn delete_comment_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<Comment>> {
    let actor = session.actor()?;
    let comment = state
        .comments
        .comment_for_edit(&actor, CommentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(comment))
}

async fn remove_comment(
    comments: &dyn CommentsCommand,
    actor: &Actor,
    id: u64,
) -> Result<HttpResponse, Error> {
    let comment = comments.delete(actor, CommentId::new(id)).await?;
    Ok(found(comments_anchor(comment.news())))
}

/// Delete a comment. Author only.
#[utoipa::path(
    post,
    path = "/news/delete_comment/{id}/",
    params(("id" = u64, Path, description = "Comment id")),
    responses(
        (status = 302, description = "Deleted; redirects to the thread, or to login when anonymous"),
        (status = 404, description = "Missing or not owned", body = ErrorSchema)
    ),
    tags = ["news"],
    operation_id = "commentDelete"
)]
#[post("/delete_comment/{id}/")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let actor = session.actor()?;
    remove_comment(state.comments.as_ref(), &actor, path.into_inner()).await
}

/// Delete a comment with the `DELETE` verb. Author only.
#[utoipa::path(
    delete,
    path = "/news/delete_comment/{id}/",
    params(("id" = u64, Path, description = "Comment id")),
    responses(
        (status = 302, description = "Deleted; redirects to the thread, or to login when anonymous"),
        (status = 404, description = "Missing or not owned", body = ErrorSchema)
    ),
    tags = ["news"],
    operation_id = "commentDeleteWithDelete"
)]
#[delete("/delete_comment/{id}/")]
pub async fn delete_comment_with_delete(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let actor = session.actor()?;
    remove_comment(state.comments.as_ref(), &actor, path.into_inner()).await
}

#[cfg(test)]
mod tests;
