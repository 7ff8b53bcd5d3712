//! Session helpers shared by the HTTP integration suites.
//!
//! Accounts are created and logged in through the real `/auth/` endpoints so
//! the cookie a test holds is the one a browser would hold.

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test;
use noticeboard::inbound::http::test_utils::session_cookie;

/// `Location` header of a redirect, if present.
pub fn location<B>(response: &ServiceResponse<B>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Sign `username` up and log them in, returning the session cookie.
pub async fn sign_up_and_log_in<S, B>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let signup = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/auth/signup/")
            .set_form([("username", username), ("password", password)])
            .to_request(),
    )
    .await;
    assert_eq!(signup.status(), StatusCode::FOUND, "signup for {username}");

    log_in(app, "/auth/login/", username, password).await
}

/// Post credentials to `login_uri`, returning the session cookie.
pub async fn log_in<S, B>(app: &S, login_uri: &str, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let login = test::call_service(
        app,
        test::TestRequest::post()
            .uri(login_uri)
            .set_form([("username", username), ("password", password)])
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::FOUND, "login for {username}");
    session_cookie(&login)
}
