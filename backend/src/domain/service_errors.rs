//! Translation of port and validation failures into domain [`Error`]s.
//!
//! Connection failures become `service_unavailable`, query failures become
//! `internal`, and validation failures carry `{field, code}` details.

use serde_json::json;

use super::ports::{NotePersistenceError, PasswordHashError, UserPersistenceError};
use super::{AccessDenied, Error, FilterError, NoteId, NoteValidationError};

pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

pub(crate) fn missing_field(field: &str) -> Error {
    field_error(
        field,
        "missing_field",
        format!("missing required field: {field}"),
    )
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => field_error(
            "username",
            "username_taken",
            format!("username {username} is already taken"),
        ),
    }
}

pub(crate) fn map_note_error(error: NotePersistenceError) -> Error {
    match error {
        NotePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("note repository unavailable: {message}"))
        }
        NotePersistenceError::Query { message } => {
            Error::internal(format!("note repository error: {message}"))
        }
    }
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn map_note_validation(error: &NoteValidationError) -> Error {
    field_error(error.field(), error.code(), error.to_string())
}

pub(crate) fn map_filter_error(error: &FilterError) -> Error {
    field_error(error.field(), "invalid_date_format", error.to_string())
}

pub(crate) fn map_access_denied(denied: AccessDenied) -> Error {
    Error::forbidden("you are not allowed to modify this note")
        .with_details(json!({ "reason": denied.reason() }))
}

pub(crate) fn note_not_found(id: NoteId) -> Error {
    Error::not_found(format!("note {id} not found"))
}
