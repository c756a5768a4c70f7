//! Note data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Maximum title/text length used when configuration does not override it.
pub const DEFAULT_NOTE_MAX_LENGTH: usize = 1000;

/// Store-assigned note identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for note title and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    TextTooLong { max: usize },
}

impl NoteValidationError {
    /// Payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::TextTooLong { .. } => "text",
        }
    }

    /// Stable machine-readable code used in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong { .. } => "title_too_long",
            Self::TextTooLong { .. } => "text_too_long",
        }
    }
}

impl fmt::Display for NoteValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::TextTooLong { max } => write!(f, "text must be at most {max} characters"),
        }
    }
}

impl std::error::Error for NoteValidationError {}

/// Validated title and body of a note.
///
/// # Examples
/// ```
/// use backend::domain::NoteContent;
///
/// let content = NoteContent::new("Groceries", "milk, eggs", 1000).unwrap();
/// assert_eq!(content.title(), "Groceries");
/// assert!(NoteContent::new("  ", "body", 1000).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent {
    title: String,
    text: String,
}

impl NoteContent {
    /// Validate `title` and `text` against `max_length` characters each.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        max_length: usize,
    ) -> Result<Self, NoteValidationError> {
        let title = title.into();
        let text = text.into();

        if title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if title.chars().count() > max_length {
            return Err(NoteValidationError::TitleTooLong { max: max_length });
        }
        if text.chars().count() > max_length {
            return Err(NoteValidationError::TextTooLong { max: max_length });
        }

        Ok(Self { title, text })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

/// Note awaiting insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub user_id: UserId,
    pub content: NoteContent,
    /// Owner's username at creation time.
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Stored values used to rebuild a [`Note`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteParts {
    pub id: NoteId,
    pub user_id: UserId,
    pub title: String,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Persisted note.
///
/// `id`, `user_id` and `created_at` never change after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    user_id: UserId,
    title: String,
    text: String,
    author: String,
    created_at: DateTime<Utc>,
}

impl Note {
    /// Rebuild a note from stored values.
    pub fn from_parts(parts: NoteParts) -> Self {
        let NoteParts {
            id,
            user_id,
            title,
            text,
            author,
            created_at,
        } = parts;
        Self {
            id,
            user_id,
            title,
            text,
            author,
            created_at,
        }
    }

    /// Attach the store-assigned id to a freshly inserted note.
    pub fn inserted(id: NoteId, note: NewNote) -> Self {
        Self {
            id,
            user_id: note.user_id,
            title: note.content.title,
            text: note.content.text,
            author: note.author,
            created_at: note.created_at,
        }
    }

    /// Replace title, text and author, keeping identity and creation time.
    #[must_use]
    pub fn revised(self, content: NoteContent, author: impl Into<String>) -> Self {
        Self {
            title: content.title,
            text: content.text,
            author: author.into(),
            ..self
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "body", NoteValidationError::EmptyTitle)]
    #[case(" \t", "body", NoteValidationError::EmptyTitle)]
    #[case("abcdef", "body", NoteValidationError::TitleTooLong { max: 5 })]
    #[case("title", "abcdef", NoteValidationError::TextTooLong { max: 5 })]
    fn content_rejects_invalid_input(
        #[case] title: &str,
        #[case] text: &str,
        #[case] expected: NoteValidationError,
    ) {
        assert_eq!(NoteContent::new(title, text, 5), Err(expected));
    }

    #[rstest]
    fn content_counts_characters_not_bytes() {
        let content = NoteContent::new("заметка", "ёжик", 7).expect("fits in seven characters");
        assert_eq!(content.title(), "заметка");
    }

    #[rstest]
    fn empty_text_is_allowed() {
        assert!(NoteContent::new("title", "", 5).is_ok());
    }

    #[rstest]
    fn revision_keeps_identity_and_creation_time() {
        let created_at = DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
            .expect("RFC3339 fixture timestamp")
            .with_timezone(&Utc);
        let note = Note::inserted(
            NoteId::new(3),
            NewNote {
                user_id: UserId::new(1),
                content: NoteContent::new("old", "old", 100).expect("valid"),
                author: "alice".to_owned(),
                created_at,
            },
        );

        let revised = note.revised(NoteContent::new("new", "new", 100).expect("valid"), "alice");

        assert_eq!(revised.id(), NoteId::new(3));
        assert_eq!(revised.user_id(), UserId::new(1));
        assert_eq!(revised.created_at(), created_at);
        assert_eq!(revised.title(), "new");
    }
}
