//! Account HTTP handlers.
//!
//! ```text
//! GET/POST /auth/login/?next=/notes/add/   {"username":"author","password":"secret"}
//! GET/POST /auth/logout/
//! GET/POST /auth/signup/                   {"username":"author","password":"secret"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Credentials, CredentialsValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{FormPayload, found, into_form};
use crate::inbound::http::login_redirect::LOGIN_PATH;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Where a login lands when no usable `next` was supplied.
pub const DEFAULT_LOGIN_REDIRECT: &str = "/news/";

/// Username and password as submitted by the login and signup forms.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<&CredentialsForm> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: &CredentialsForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Query string accepted by the login endpoints.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Form description returned by the `GET` account pages.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountPageResponse {
    pub fields: [&'static str; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Confirmation returned after logging out.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub logged_out: bool,
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    Error::field(err.field(), err.to_string())
}

/// Accept only same-site absolute paths as a post-login target.
///
/// # Examples
/// ```
/// use noticeboard::inbound::http::accounts::safe_next;
///
/// assert_eq!(safe_next(Some("/notes/add/")), "/notes/add/");
/// assert_eq!(safe_next(Some("//evil.example/")), "/news/");
/// assert_eq!(safe_next(Some("https://evil.example/")), "/news/");
/// assert_eq!(safe_next(None), "/news/");
/// ```
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => DEFAULT_LOGIN_REDIRECT,
    }
}

/// Mount the account handlers under `/auth`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use noticeboard::inbound::http::accounts;
///
/// let app = App::new().configure(accounts::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(login_form)
            .service(login)
            .service(logout_get)
            .service(logout)
            .service(signup_form)
            .service(signup),
    );
}

/// Describe the login form.
#[utoipa::path(
    get,
    path = "/auth/login/",
    params(("next" = Option<String>, Query, description = "Path to return to after login")),
    responses((status = 200, description = "Login form", body = AccountPageResponse)),
    tags = ["accounts"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login/")]
pub async fn login_form(query: web::Query<NextQuery>) -> web::Json<AccountPageResponse> {
    web::Json(AccountPageResponse {
        fields: ["username", "password"],
        next: query.into_inner().next,
    })
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/auth/login/",
    params(("next" = Option<String>, Query, description = "Path to return to after login")),
    request_body = CredentialsForm,
    responses(
        (
            status = 302,
            description = "Logged in; redirects to `next` or /news/",
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NextQuery>,
    payload: FormPayload<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let form = into_form(payload);
    let credentials = Credentials::try_from(&form).map_err(map_credentials_error)?;
    let user_id = state.accounts.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(%user_id, "user logged in");
    Ok(found(safe_next(query.next.as_deref())))
}

/// Log out. Served on `GET` as well for plain links.
#[utoipa::path(
    get,
    path = "/auth/logout/",
    responses((status = 200, description = "Session cleared", body = LogoutResponse)),
    tags = ["accounts"],
    operation_id = "logoutGet",
    security([])
)]
#[get("/logout/")]
pub async fn logout_get(session: SessionContext) -> web::Json<LogoutResponse> {
    session.clear();
    web::Json(LogoutResponse { logged_out: true })
}

/// Log out.
#[utoipa::path(
    post,
    path = "/auth/logout/",
    responses((status = 200, description = "Session cleared", body = LogoutResponse)),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/logout/")]
pub async fn logout(session: SessionContext) -> web::Json<LogoutResponse> {
    session.clear();
    web::Json(LogoutResponse { logged_out: true })
}

/// Describe the signup form.
#[utoipa::path(
    get,
    path = "/auth/signup/",
    responses((status = 200, description = "Signup form", body = AccountPageResponse)),
    tags = ["accounts"],
    operation_id = "signupForm",
    security([])
)]
#[get("/signup/")]
pub async fn signup_form() -> web::Json<AccountPageResponse> {
    web::Json(AccountPageResponse {
        fields: ["username", "password"],
        next: None,
    })
}

/// Register an account, then send the user to the login form.
#[utoipa::path(
    post,
    path = "/auth/signup/",
    request_body = CredentialsForm,
    responses(
        (status = 302, description = "Registered; redirects to /auth/login/"),
        (status = 400, description = "Invalid or taken username", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signup",
    security([])
)]
#[post("/signup/")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: FormPayload<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let form = into_form(payload);
    let credentials = Credentials::try_from(&form).map_err(map_credentials_error)?;
    state.accounts.signup(&credentials).await?;
    Ok(found(LOGIN_PATH))
}
