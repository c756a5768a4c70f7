//! Note HTTP handlers.
//!
//! ```text
//! POST /note {"title":"Groceries","text":"eggs"}
//! PUT /note/{id} {"title":"Groceries","text":"eggs, milk"}
//! DELETE /note/{id}
//! GET /notes?username=alice&date=2024-03-01&page=2&limit=5
//! ```
//!
//! Every handler requires the `token` cookie; see [`AuthenticatedUser`].

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::NoteFilterParams;
use crate::domain::ports::{ListedNote, NoteDraft, NotePayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::MessageResponse;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, ListedNoteSchema, NotePayloadSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_note_id};

const ID: FieldName = FieldName::new("id");

/// Request payload for creating or replacing a note.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    #[schema(example = "Groceries")]
    pub title: Option<String>,
    #[schema(example = "eggs, milk")]
    pub text: Option<String>,
}

/// Query string accepted by `GET /notes`.
///
/// All values arrive as strings; blank values count as absent and parsing
/// happens in the domain so malformed dates surface as field errors.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListNotesQuery {
    /// Inclusive first day, `YYYY-MM-DD`. Needs `end_date`.
    pub start_date: Option<String>,
    /// Inclusive last day, `YYYY-MM-DD`. Needs `start_date`.
    pub end_date: Option<String>,
    /// Single day, `YYYY-MM-DD`. Ignored when a full range is given.
    pub date: Option<String>,
    /// Restrict to one author's notes.
    pub username: Option<String>,
    /// 1-based page number, default 1.
    pub page: Option<String>,
    /// Page size, default 10.
    pub limit: Option<String>,
}

impl From<ListNotesQuery> for NoteFilterParams {
    fn from(value: ListNotesQuery) -> Self {
        let ListNotesQuery {
            start_date,
            end_date,
            date,
            username,
            page,
            limit,
        } = value;
        Self {
            start_date,
            end_date,
            date,
            username,
            page,
            limit,
        }
    }
}

impl From<NoteRequest> for NoteDraft {
    fn from(value: NoteRequest) -> Self {
        let NoteRequest { title, text } = value;
        Self { title, text }
    }
}

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/note",
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Created note", body = NotePayloadSchema),
        (status = 400, description = "Invalid title or text", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "createNote"
)]
#[post("/note")]
pub async fn create_note(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<NoteRequest>,
) -> ApiResult<web::Json<NotePayload>> {
    let note = state
        .notes
        .create_note(user.id(), payload.into_inner().into())
        .await?;
    Ok(web::Json(note))
}

/// Replace the title and text of one of the caller's notes.
///
/// Allowed for 24 hours after creation. Refusals for foreign notes and
/// closed edit windows share the `401` status and carry `details.reason`.
#[utoipa::path(
    put,
    path = "/note/{id}",
    params(("id" = i64, Path, description = "Note identifier")),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Updated note", body = NotePayloadSchema),
        (status = 400, description = "Invalid id, title or text", body = ErrorSchema),
        (status = 401, description = "Missing token, not the owner, or edit window closed", body = ErrorSchema),
        (status = 404, description = "Note not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "editNote"
)]
#[put("/note/{id}")]
pub async fn edit_note(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<NoteRequest>,
) -> ApiResult<web::Json<NotePayload>> {
    let id = parse_note_id(&path.into_inner(), ID)?;
    let note = state
        .notes
        .edit_note(user.id(), id, payload.into_inner().into())
        .await?;
    Ok(web::Json(note))
}

/// Delete one of the caller's notes.
#[utoipa::path(
    delete,
    path = "/note/{id}",
    params(("id" = i64, Path, description = "Note identifier")),
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Missing token or not the owner", body = ErrorSchema),
        (status = 404, description = "Note not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[delete("/note/{id}")]
pub async fn delete_note(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_note_id(&path.into_inner(), ID)?;
    state.notes.delete_note(user.id(), id).await?;
    Ok(web::Json(MessageResponse::new("note deleted")))
}

/// List notes, newest first.
///
/// Filter precedence: `username` with a full date range, full date range,
/// `username` with `date`, `date`, `username`, everything.
#[utoipa::path(
    get,
    path = "/notes",
    params(ListNotesQuery),
    responses(
        (status = 200, description = "Matching notes", body = [ListedNoteSchema]),
        (status = 400, description = "Bad date or unknown username", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<ListNotesQuery>,
) -> ApiResult<web::Json<Vec<ListedNote>>> {
    let notes = state
        .notes_query
        .list_notes(user.id(), query.into_inner().into())
        .await?;
    Ok(web::Json(notes))
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;
