//! PostgreSQL-backed `NoteRepository` implementation using Diesel ORM.
//!
//! All six listing strategies share one boxed query: optional owner and
//! creation-window filters, newest first with id as tie breaker, then
//! `LIMIT`/`OFFSET`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NotePersistenceError, NoteRepository};
use crate::domain::{NewNote, Note, NoteId, NoteListQuery, NoteParts, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewNoteRow, NoteRow, NoteUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::notes;

/// Diesel-backed note store.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NotePersistenceError {
    map_basic_pool_error(error, NotePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> NotePersistenceError {
    map_basic_diesel_error(
        error,
        NotePersistenceError::query,
        NotePersistenceError::connection,
    )
}

fn row_to_note(row: NoteRow) -> Note {
    Note::from_parts(NoteParts {
        id: NoteId::new(row.id),
        user_id: UserId::new(row.user_id),
        title: row.title,
        text: row.text,
        author: row.author,
        created_at: row.created_at,
    })
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn insert(&self, note: &NewNote) -> Result<Note, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewNoteRow {
            user_id: note.user_id.as_i64(),
            title: note.content.title(),
            text: note.content.text(),
            author: note.author.as_str(),
            created_at: note.created_at,
        };

        diesel::insert_into(notes::table)
            .values(&row)
            .returning(NoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_note)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        notes::table
            .find(id.as_i64())
            .select(NoteRow::as_select())
            .first::<NoteRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_note))
            .map_err(map_diesel_error)
    }

    async fn update(&self, note: &Note) -> Result<bool, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = NoteUpdate {
            title: note.title(),
            text: note.text(),
            author: note.author(),
        };

        diesel::update(notes::table.find(note.id().as_i64()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map(|rows| rows > 0)
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(notes::table.find(id.as_i64()))
            .execute(&mut conn)
            .await
            .map(|rows| rows > 0)
            .map_err(map_diesel_error)
    }

    async fn list(&self, query: &NoteListQuery) -> Result<Vec<Note>, NotePersistenceError> {
        let offset = i64::try_from(query.page.offset())
            .map_err(|_| NotePersistenceError::query("page offset out of range"))?;
        let limit = i64::from(query.page.limit());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = notes::table.select(NoteRow::as_select()).into_boxed();
        if let Some(owner) = query.owner {
            statement = statement.filter(notes::user_id.eq(owner.as_i64()));
        }
        if let Some(window) = query.window {
            statement = statement
                .filter(notes::created_at.ge(window.start()))
                .filter(notes::created_at.lt(window.end()));
        }

        let rows: Vec<NoteRow> = statement
            .order((notes::created_at.desc(), notes::id.desc()))
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_note).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.
    use chrono::{DateTime, Utc};
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, NotePersistenceError::Connection { .. }));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, NotePersistenceError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_keeps_every_column() {
        let created_at = DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
            .expect("RFC3339 fixture timestamp")
            .with_timezone(&Utc);
        let note = row_to_note(NoteRow {
            id: 3,
            user_id: 1,
            title: "title".to_owned(),
            text: "text".to_owned(),
            author: "alice".to_owned(),
            created_at,
        });

        assert_eq!(note.id(), NoteId::new(3));
        assert_eq!(note.user_id(), UserId::new(1));
        assert_eq!(note.author(), "alice");
        assert_eq!(note.created_at(), created_at);
    }
}
