//! Payload and redirect helpers for the form-style endpoints.
//!
//! Mutating endpoints accept either a JSON body or an
//! `application/x-www-form-urlencoded` body with the same fields, and answer
//! success with `302 Found`.

use actix_web::http::header;
use actix_web::{Either, HttpResponse, web};

use crate::domain::Actor;

/// Request body accepted as JSON or as an urlencoded form.
pub type FormPayload<T> = Either<web::Json<T>, web::Form<T>>;

/// [`FormPayload`] whose extraction failure is deferred to the handler.
///
/// Login-only endpoints take this so an anonymous request is answered with
/// `401` (and so the login redirect) before a missing or malformed body is
/// reported.
pub type DeferredForm<T> = Result<FormPayload<T>, actix_web::Error>;

/// Unwrap whichever representation the client sent.
pub fn into_form<T>(payload: FormPayload<T>) -> T {
    match payload {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// Unwrap a [`DeferredForm`] submitted by `actor`.
///
/// # Errors
/// `401 Unauthorized` for an anonymous actor, whatever the body holds;
/// otherwise the body's extraction error, if any.
pub fn submitted_form<T>(actor: &Actor, payload: DeferredForm<T>) -> actix_web::Result<T> {
    actor.require_user()?;
    payload.map(into_form)
}

/// `302 Found` pointing at `location`.
///
/// # Examples
/// ```
/// use actix_web::http::{StatusCode, header};
/// use noticeboard::inbound::http::forms::found;
///
/// let response = found("/notes/done/");
/// assert_eq!(response.status(), StatusCode::FOUND);
/// assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/notes/done/");
/// ```
pub fn found(location: impl Into<String>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.into()))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, ErrorCode, UserId};
    use actix_web::http::StatusCode;
    use actix_web::{FromRequest, test};
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TextBody {
        text: String,
    }

    async fn extract(req: test::TestRequest) -> DeferredForm<TextBody> {
        let (req, mut payload) = req.to_http_parts();
        DeferredForm::<TextBody>::from_request(&req, &mut payload)
            .await
            .expect("deferred extraction never fails")
    }

    #[actix_web::test]
    async fn anonymous_actor_is_unauthorised_before_the_body_is_read() {
        let payload = extract(test::TestRequest::post()).await;
        assert!(payload.is_err());

        let err = submitted_form(&Actor::Anonymous, payload).expect_err("anonymous");

        assert_eq!(
            err.as_error::<Error>().map(Error::code),
            Some(ErrorCode::Unauthorized)
        );
    }

    #[rstest]
    #[case::form(test::TestRequest::post().set_form([("text", "привет")]))]
    #[case::json(test::TestRequest::post().set_json(serde_json::json!({ "text": "привет" })))]
    #[actix_web::test]
    async fn signed_in_actor_gets_either_representation(#[case] req: test::TestRequest) {
        let actor = Actor::User(UserId::random());
        let form = submitted_form(&actor, extract(req).await).expect("payload");
        assert_eq!(form.text, "привет");
    }

    #[actix_web::test]
    async fn signed_in_actor_sees_the_extraction_error() {
        let actor = Actor::User(UserId::random());
        let err = submitted_form(&actor, extract(test::TestRequest::post()).await)
            .expect_err("missing body");
        assert_ne!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
    }
}
