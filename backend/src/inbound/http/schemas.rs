//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

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
    /// Authenticated but not the owner, or the edit window has closed.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
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
    #[schema(example = "title must not be empty")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as `{"field": "title", "code": "empty_title"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ports::NotePayload`].
///
/// Note returned by create and edit.
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::NotePayload, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NotePayloadSchema {
    #[schema(example = 12)]
    id: i64,
    #[schema(example = 3)]
    user_id: i64,
    #[schema(example = "Groceries")]
    title: String,
    #[schema(example = "eggs, milk")]
    text: String,
    /// Owner's username at the time of the last write.
    #[schema(example = "alice")]
    author: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::ports::ListedNote`].
///
/// One entry of a `GET /notes` response.
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::ListedNote, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ListedNoteSchema {
    #[schema(example = "Groceries")]
    title: String,
    #[schema(example = "eggs, milk")]
    text: String,
    /// Current username of the note's owner.
    #[schema(example = "alice")]
    author: String,
    /// Present and `true` only for the caller's own notes.
    belongs_to_current_user: Option<bool>,
}
