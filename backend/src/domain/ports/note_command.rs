//! Driving port for note mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Note, NoteId, UserId};

/// Serializable note returned by create and edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    pub id: NoteId,
    pub user_id: UserId,
    pub title: String,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<Note> for NotePayload {
    fn from(value: Note) -> Self {
        Self {
            id: value.id(),
            user_id: value.user_id(),
            title: value.title().to_owned(),
            text: value.text().to_owned(),
            author: value.author().to_owned(),
            created_at: value.created_at(),
        }
    }
}

/// Raw title and text supplied by a client.
///
/// Either field may be absent. Edits report a missing field only once the
/// note has been found and the requester may change it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub text: Option<String>,
}

impl NoteDraft {
    /// Draft with both fields present.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            text: Some(text.into()),
        }
    }
}

/// Driving port for note write operations.
///
/// Every operation receives the authenticated requester; token checks happen
/// in the inbound adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteCommand: Send + Sync {
    /// Validate and store a new note owned by `requester`.
    async fn create_note(&self, requester: UserId, draft: NoteDraft)
    -> Result<NotePayload, Error>;

    /// Replace title and text of a note the requester owns, within the edit
    /// window.
    async fn edit_note(
        &self,
        requester: UserId,
        id: NoteId,
        draft: NoteDraft,
    ) -> Result<NotePayload, Error>;

    /// Delete a note the requester owns.
    async fn delete_note(&self, requester: UserId, id: NoteId) -> Result<(), Error>;
}
