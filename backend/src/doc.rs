//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the HTTP interface. It registers:
//!
//! - **Paths**: every notes, news, account and health endpoint
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] plus the handler-level page payloads
//! - **Security**: session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::accounts::{AccountPageResponse, CredentialsForm, LogoutResponse};
use crate::inbound::http::notes::{NotesDoneResponse, NotesHomeResponse};
use crate::inbound::http::schemas::{
    CommentFormSchema, CommentSchema, ErrorCodeSchema, ErrorSchema, NewsDetailSchema,
    NewsItemSchema, NoteFormSchema, NoteSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie issued by POST /auth/login/.",
            ))),
        );
    }
}

/// OpenAPI document for the noticeboard.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Noticeboard API",
        description = "Private notes and commented news behind session authentication.",
        license(
            name = "ISC",
            url = "https://opensource.org/license/isc-license-txt"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::notes::home,
        crate::inbound::http::notes::add_form,
        crate::inbound::http::notes::add,
        crate::inbound::http::notes::list,
        crate::inbound::http::notes::done,
        crate::inbound::http::notes::detail,
        crate::inbound::http::notes::edit_form,
        crate::inbound::http::notes::edit,
        crate::inbound::http::notes::delete_form,
        crate::inbound::http::notes::delete,
        crate::inbound::http::news::home,
        crate::inbound::http::news::detail,
        crate::inbound::http::news::submit_comment,
        crate::inbound::http::news::edit_comment_form,
        crate::inbound::http::news::edit_comment,
        crate::inbound::http::news::delete_comment_form,
        crate::inbound::http::news::delete_comment,
        crate::inbound::http::news::delete_comment_with_delete,
        crate::inbound::http::accounts::login_form,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout_get,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::signup_form,
        crate::inbound::http::accounts::signup,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        NoteSchema,
        NoteFormSchema,
        NewsItemSchema,
        CommentSchema,
        CommentFormSchema,
        NewsDetailSchema,
        NotesHomeResponse,
        NotesDoneResponse,
        CredentialsForm,
        AccountPageResponse,
        LogoutResponse,
    )),
    tags(
        (name = "notes", description = "Private notes owned by the logged-in user"),
        (name = "news", description = "News feed and reader comments"),
        (name = "accounts", description = "Sign-up, login and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
