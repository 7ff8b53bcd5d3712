//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their corresponding
//! domain types but live in the inbound adapter layer where framework
//! concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The resource does not exist or is not visible to the caller.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Validation failures carry `details.fieldErrors`, a map from form field to
/// its messages.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Не ругайтесь!")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    #[schema(example = json!({ "fieldErrors": { "text": ["Не ругайтесь!"] } }))]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::notes::Note`].
#[derive(ToSchema)]
#[schema(as = crate::domain::notes::Note)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NoteSchema {
    #[schema(example = 1)]
    id: u64,
    #[schema(example = "Заголовок")]
    title: String,
    #[schema(example = "Текст")]
    text: String,
    /// Unique across all authors.
    #[schema(example = "zagolovok")]
    slug: String,
    /// Owner's user id.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    author: String,
}

/// OpenAPI schema for [`crate::domain::notes::NoteForm`].
#[derive(ToSchema)]
#[schema(as = crate::domain::notes::NoteForm)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NoteFormSchema {
    /// At most 100 characters.
    #[schema(example = "Заголовок")]
    title: String,
    #[schema(example = "Текст")]
    text: String,
    /// Letters, digits, `-` and `_`; derived from the title when blank.
    #[schema(example = "zagolovok")]
    slug: Option<String>,
}

/// OpenAPI schema for [`crate::domain::news::NewsItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::news::NewsItem)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NewsItemSchema {
    #[schema(example = 1)]
    id: u64,
    #[schema(example = "Новость")]
    title: String,
    text: String,
    /// Publication date.
    #[schema(value_type = String, format = Date, example = "2024-01-15")]
    date: String,
}

/// OpenAPI schema for [`crate::domain::news::Comment`].
#[derive(ToSchema)]
#[schema(as = crate::domain::news::Comment)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CommentSchema {
    #[schema(example = 1)]
    id: u64,
    /// News item id.
    #[schema(example = 1)]
    news: u64,
    /// Author's user id.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    author: String,
    #[schema(example = "Текст комментария")]
    text: String,
    #[schema(value_type = String, format = DateTime, example = "2024-01-15T12:00:00Z")]
    created: String,
}

/// OpenAPI schema for [`crate::domain::news::CommentForm`].
#[derive(ToSchema)]
#[schema(as = crate::domain::news::CommentForm)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CommentFormSchema {
    /// Must not be blank or contain a banned word.
    #[schema(example = "Текст комментария")]
    text: String,
}

/// OpenAPI schema for [`crate::domain::news::NewsDetail`].
#[derive(ToSchema)]
#[schema(as = crate::domain::news::NewsDetail)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NewsDetailSchema {
    news: NewsItemSchema,
    /// Oldest first.
    comments: Vec<CommentSchema>,
    /// Present for logged-in readers only.
    form: Option<CommentFormSchema>,
}
