//! Domain primitives, services and ports.
//!
//! Purpose: hold the note-taking rules independently of HTTP and SQL. Types
//! are immutable once built and document their invariants in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Username, UserId: account identity.
//! - Note, NoteContent, NoteId: notes and validated content.
//! - TokenService, SessionToken: stateless session credentials.
//! - can_mutate / can_delete: ownership and edit-window decisions.
//! - FilterCriteria, ListStrategy, NoteListQuery: listing filters.
//! - AccountService, NoteService: driving-port implementations.

pub mod account_service;
pub mod auth;
pub mod authorization;
pub mod error;
pub mod note;
pub mod note_query;
pub mod note_service;
pub mod ports;
mod service_errors;
pub mod token;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MAX, PASSWORD_MIN, SignupCredentials,
    SignupValidationError,
};
pub use self::authorization::{AccessDenied, EDIT_WINDOW_HOURS, can_delete, can_mutate};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::note::{
    DEFAULT_NOTE_MAX_LENGTH, NewNote, Note, NoteContent, NoteId, NoteParts, NoteValidationError,
};
pub use self::note_query::{
    DATE_FORMAT, DateWindow, FilterCriteria, FilterError, ListStrategy, NoteFilterParams,
    NoteListQuery,
};
pub use self::note_service::NoteService;
pub use self::token::{
    DEFAULT_TOKEN_ISSUER, InvalidTokenReason, SESSION_TTL_SECS, SessionToken, TokenError,
    TokenService, session_ttl,
};
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
