//! Shared validation helpers for inbound HTTP adapters.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, LoginValidationError, NoteId, SignupValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    EmptyUsername,
    EmptyPassword,
    InvalidId,
    MalformedBody,
    MalformedQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyUsername => "empty_username",
            ErrorCode::EmptyPassword => "empty_password",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::MalformedQuery => "malformed_query",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    let code = match err {
        LoginValidationError::EmptyUsername => ErrorCode::EmptyUsername,
        LoginValidationError::EmptyPassword => ErrorCode::EmptyPassword,
    };
    ValidationError::new(err.field(), err.to_string()).with_code(code.as_str())
}

pub(crate) fn map_signup_validation_error(err: SignupValidationError) -> Error {
    ValidationError::new(err.field(), err.to_string()).with_code(err.code())
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a positive integer"))
        .with_value(ErrorCode::InvalidId, value)
}

/// Parse a note id taken from the request path.
pub(crate) fn parse_note_id(value: &str, field: FieldName) -> Result<NoteId, Error> {
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Ok(NoteId::new(id)),
        _ => Err(invalid_id_error(field, value)),
    }
}

/// `JsonConfig` error handler turning body extraction failures into the
/// standard error payload.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let error = Error::invalid_request(format!("malformed request body: {err}"))
        .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }));
    error.into()
}

/// `QueryConfig` error handler turning query string failures into the
/// standard error payload.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    let error = Error::invalid_request(format!("malformed query string: {err}"))
        .with_details(json!({ "code": ErrorCode::MalformedQuery.as_str() }));
    error.into()
}
