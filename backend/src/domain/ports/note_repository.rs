//! Port abstraction for note persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewNote, Note, NoteId, NoteListQuery};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by note repository adapters.
    pub enum NotePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "note repository query failed: {message}",
    }
}

/// Note store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note and return it with its assigned id.
    async fn insert(&self, note: &NewNote) -> Result<Note, NotePersistenceError>;

    /// Fetch a note by identifier.
    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NotePersistenceError>;

    /// Persist new title, text and author for an existing note.
    ///
    /// Returns `false` when no row matched.
    async fn update(&self, note: &Note) -> Result<bool, NotePersistenceError>;

    /// Remove a note. Returns `false` when no row matched.
    async fn delete(&self, id: NoteId) -> Result<bool, NotePersistenceError>;

    /// Run a listing query: optional owner and window filters, newest first,
    /// one page.
    async fn list(&self, query: &NoteListQuery) -> Result<Vec<Note>, NotePersistenceError>;
}
