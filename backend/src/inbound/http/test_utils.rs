//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;
use actix_web::{HttpResponse, Resource, web};

use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;

/// Name of the session cookie issued by [`test_session_middleware`].
pub const TEST_SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Names the cookie [`TEST_SESSION_COOKIE`] and disables the `Secure` flag
///   for local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `response`.
///
/// # Panics
/// Panics when the response did not set a session cookie.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
        .unwrap_or_else(|| panic!("response did not set the session cookie"))
}

/// Path prefix of the route registered by [`test_login_route`].
pub const TEST_LOGIN_PATH: &str = "/__test/login";

/// Route that logs in the user named by the last path segment.
///
/// Handler tests register it next to the handlers under test and call
/// [`test_login_request`] to obtain a session cookie without going through
/// password hashing.
pub fn test_login_route() -> Resource {
    web::resource(format!("{TEST_LOGIN_PATH}/{{user_id}}")).route(web::get().to(
        |session: SessionContext, path: web::Path<String>| async move {
            let id = UserId::new(path.into_inner())
                .map_err(|err| Error::invalid_request(err.to_string()))?;
            session.persist_user(&id)?;
            Ok::<_, Error>(HttpResponse::Ok().finish())
        },
    ))
}

/// Request for [`test_login_route`] logging in `user`.
pub fn test_login_request(user: &UserId) -> TestRequest {
    TestRequest::get().uri(&format!("{TEST_LOGIN_PATH}/{user}"))
}
