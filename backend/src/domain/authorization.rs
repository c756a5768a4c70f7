//! Ownership and edit-window decisions.
//!
//! Pure functions with no I/O. Callers resolve "note not found" first and
//! pass the loaded note in.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use super::{Note, UserId};

/// Hours after creation during which the owner may edit a note.
pub const EDIT_WINDOW_HOURS: i64 = 24;

/// Reason a mutation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    NotOwner,
    EditWindowExpired,
}

impl AccessDenied {
    /// Stable machine-readable reason used in error details.
    pub fn reason(self) -> &'static str {
        match self {
            Self::NotOwner => "not_owner",
            Self::EditWindowExpired => "edit_window_expired",
        }
    }
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOwner => write!(f, "note belongs to another user"),
            Self::EditWindowExpired => write!(
                f,
                "notes can only be edited within {EDIT_WINDOW_HOURS} hours of creation"
            ),
        }
    }
}

impl std::error::Error for AccessDenied {}

fn edit_window() -> TimeDelta {
    TimeDelta::hours(EDIT_WINDOW_HOURS)
}

/// Decide whether `requester` may edit `note` at `now`.
///
/// The window is closed: an edit exactly 24 hours after creation is allowed.
///
/// # Examples
/// ```
/// use backend::domain::{can_mutate, AccessDenied, NewNote, Note, NoteContent, NoteId, UserId};
/// use chrono::{TimeDelta, Utc};
///
/// let created_at = Utc::now();
/// let note = Note::inserted(NoteId::new(1), NewNote {
///     user_id: UserId::new(1),
///     content: NoteContent::new("t", "x", 10).unwrap(),
///     author: "alice".into(),
///     created_at,
/// });
/// assert!(can_mutate(UserId::new(1), &note, created_at + TimeDelta::hours(1)).is_ok());
/// assert_eq!(can_mutate(UserId::new(2), &note, created_at), Err(AccessDenied::NotOwner));
/// ```
pub fn can_mutate(requester: UserId, note: &Note, now: DateTime<Utc>) -> Result<(), AccessDenied> {
    if note.user_id() != requester {
        return Err(AccessDenied::NotOwner);
    }
    if now - note.created_at() > edit_window() {
        return Err(AccessDenied::EditWindowExpired);
    }
    Ok(())
}

/// Decide whether `requester` may delete `note`. Age is irrelevant.
pub fn can_delete(requester: UserId, note: &Note) -> Result<(), AccessDenied> {
    if note.user_id() != requester {
        return Err(AccessDenied::NotOwner);
    }
    Ok(())
}
