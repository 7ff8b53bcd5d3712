//! Middleware sending anonymous visitors to the login page.
//!
//! Handlers under the notes and news scopes report a missing login as
//! `401 Unauthorized`. This middleware rewrites those responses into
//! `302 Found` with `Location: /auth/login/?next=<original path>`, so
//! browsers land on the login form and come back afterwards.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use super::forms::found;

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/auth/login/";

/// Build the login URL that returns to `next` after a successful login.
///
/// Slashes in `next` stay readable, spaces become `%20` and everything else
/// is form-encoded.
///
/// # Examples
/// ```
/// use noticeboard::inbound::http::login_redirect::login_url;
///
/// assert_eq!(login_url("/notes/add/"), "/auth/login/?next=/notes/add/");
/// assert_eq!(login_url("/news/1/?a=b"), "/auth/login/?next=/news/1/%3Fa%3Db");
/// assert_eq!(login_url("/news/?q=a b"), "/auth/login/?next=/news/%3Fq%3Da%20b");
/// ```
pub fn login_url(next: &str) -> String {
    // A literal `+` is serialised as `%2B`, so every `+` left is a space.
    let encoded: String = url::form_urlencoded::byte_serialize(next.as_bytes())
        .map(|chunk| match chunk {
            "+" => "%20",
            "%2F" => "/",
            other => other,
        })
        .collect();
    format!("{LOGIN_PATH}?next={encoded}")
}

fn redirect_to_login(request: HttpRequest, next: &str) -> ServiceResponse {
    let location = login_url(next);
    debug!(%location, "redirecting anonymous request to login");
    ServiceResponse::new(request, found(location))
}

/// Rewrites `401 Unauthorized` into a login redirect.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use noticeboard::inbound::http::login_redirect::LoginRedirect;
///
/// let app = App::new().service(web::scope("/notes").wrap(LoginRedirect));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LoginRedirect;

impl<S, B> Transform<S, ServiceRequest> for LoginRedirect
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = LoginRedirectMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoginRedirectMiddleware { service }))
    }
}

/// Service wrapper produced by [`LoginRedirect`].
pub struct LoginRedirectMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for LoginRedirectMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let next = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
        let request = req.request().clone();
        let fut = self.service.call(req);
        Box::pin(async move {
            match fut.await {
                Ok(res) if res.status() == StatusCode::UNAUTHORIZED => {
                    let (request, _) = res.into_parts();
                    Ok(redirect_to_login(request, &next).map_into_right_body())
                }
                Ok(res) => Ok(res.map_into_left_body()),
                Err(err) if err.as_response_error().status_code() == StatusCode::UNAUTHORIZED => {
                    Ok(redirect_to_login(request, &next).map_into_right_body())
                }
                Err(err) => Err(err),
            }
        })
    }
}
