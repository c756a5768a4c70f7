//! Note lifecycle service: create, edit, delete and list.
//!
//! Requesters arrive already authenticated. Mutations consult the pure
//! checks in [`crate::domain::authorization`]; listing resolves any username
//! filter before the note store is queried.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    ListedNote, NoteCommand, NoteDraft, NotePayload, NoteQuery, NoteRepository, UserRepository,
};
use crate::domain::service_errors::{
    field_error, map_access_denied, map_filter_error, map_note_error, map_note_validation,
    map_user_error, missing_field, note_not_found,
};
use crate::domain::{
    DEFAULT_NOTE_MAX_LENGTH, Error, FilterCriteria, NewNote, Note, NoteContent, NoteFilterParams,
    NoteId, NoteListQuery, UserId, can_delete, can_mutate,
};

/// Note service implementing [`NoteCommand`] and [`NoteQuery`].
#[derive(Clone)]
pub struct NoteService<U, N> {
    users: Arc<U>,
    notes: Arc<N>,
    clock: Arc<dyn Clock>,
    max_length: usize,
}

impl<U, N> NoteService<U, N> {
    /// Create a service with the default title/text length limit.
    pub fn new(users: Arc<U>, notes: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            notes,
            clock,
            max_length: DEFAULT_NOTE_MAX_LENGTH,
        }
    }

    /// Override the maximum title/text length in characters.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

impl<U, N> NoteService<U, N>
where
    U: UserRepository,
    N: NoteRepository,
{
    async fn load_note(&self, id: NoteId) -> Result<Note, Error> {
        self.notes
            .find_by_id(id)
            .await
            .map_err(map_note_error)?
            .ok_or_else(|| note_not_found(id))
    }

    fn content(&self, draft: NoteDraft) -> Result<NoteContent, Error> {
        let NoteDraft { title, text } = draft;
        let title = title.ok_or_else(|| missing_field("title"))?;
        let text = text.ok_or_else(|| missing_field("text"))?;
        NoteContent::new(title, text, self.max_length)
            .map_err(|err| map_note_validation(&err))
    }

    async fn resolve_owner(&self, username: &str) -> Result<UserId, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?
            .map(|user| user.id())
            .ok_or_else(|| {
                field_error(
                    "username",
                    "unknown_user",
                    format!("user {username} does not exist"),
                )
            })
    }

    async fn author_name(
        &self,
        cache: &mut HashMap<UserId, String>,
        note: &Note,
    ) -> Result<String, Error> {
        if let Some(name) = cache.get(&note.user_id()) {
            return Ok(name.clone());
        }
        let name = match self
            .users
            .find_by_id(note.user_id())
            .await
            .map_err(map_user_error)?
        {
            Some(owner) => owner.username().to_owned(),
            None => {
                warn!(note_id = %note.id(), user_id = %note.user_id(), "note owner missing");
                note.author().to_owned()
            }
        };
        cache.insert(note.user_id(), name.clone());
        Ok(name)
    }
}

#[async_trait]
impl<U, N> NoteCommand for NoteService<U, N>
where
    U: UserRepository,
    N: NoteRepository,
{
    async fn create_note(
        &self,
        requester: UserId,
        draft: NoteDraft,
    ) -> Result<NotePayload, Error> {
        let author = self
            .users
            .find_by_id(requester)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))?;
        let content = self.content(draft)?;

        let note = self
            .notes
            .insert(&NewNote {
                user_id: requester,
                content,
                author: author.username().to_owned(),
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_note_error)?;

        info!(note_id = %note.id(), user_id = %requester, "note created");
        Ok(note.into())
    }

    async fn edit_note(
        &self,
        requester: UserId,
        id: NoteId,
        draft: NoteDraft,
    ) -> Result<NotePayload, Error> {
        let note = self.load_note(id).await?;
        can_mutate(requester, &note, self.clock.utc()).map_err(|denied| {
            debug!(note_id = %id, user_id = %requester, reason = denied.reason(), "edit refused");
            map_access_denied(denied)
        })?;
        let content = self.content(draft)?;

        let author = self
            .users
            .find_by_id(note.user_id())
            .await
            .map_err(map_user_error)?
            .map_or_else(|| note.author().to_owned(), |owner| owner.username().to_owned());
        let revised = note.revised(content, author);

        if !self.notes.update(&revised).await.map_err(map_note_error)? {
            return Err(note_not_found(id));
        }
        info!(note_id = %id, user_id = %requester, "note edited");
        Ok(revised.into())
    }

    async fn delete_note(&self, requester: UserId, id: NoteId) -> Result<(), Error> {
        let note = self.load_note(id).await?;
        can_delete(requester, &note).map_err(|denied| {
            debug!(note_id = %id, user_id = %requester, reason = denied.reason(), "delete refused");
            map_access_denied(denied)
        })?;

        if !self.notes.delete(id).await.map_err(map_note_error)? {
            return Err(note_not_found(id));
        }
        info!(note_id = %id, user_id = %requester, "note deleted");
        Ok(())
    }
}

#[async_trait]
impl<U, N> NoteQuery for NoteService<U, N>
where
    U: UserRepository,
    N: NoteRepository,
{
    async fn list_notes(
        &self,
        requester: UserId,
        filters: NoteFilterParams,
    ) -> Result<Vec<ListedNote>, Error> {
        let criteria = FilterCriteria::parse(&filters).map_err(|err| map_filter_error(&err))?;
        let strategy = criteria.strategy();
        let owner = match strategy.username() {
            Some(username) => Some(self.resolve_owner(username).await?),
            None => None,
        };

        let query = NoteListQuery {
            owner,
            window: strategy.window(),
            page: criteria.page(),
        };
        debug!(
            %strategy,
            page = query.page.page(),
            limit = query.page.limit(),
            "listing notes"
        );
        let notes = self.notes.list(&query).await.map_err(map_note_error)?;

        let mut authors = HashMap::new();
        let mut listed = Vec::with_capacity(notes.len());
        for note in notes {
            let author = self.author_name(&mut authors, &note).await?;
            listed.push(ListedNote {
                title: note.title().to_owned(),
                text: note.text().to_owned(),
                author,
                belongs_to_current_user: (note.user_id() == requester).then_some(true),
            });
        }
        Ok(listed)
    }
}

#[cfg(test)]
#[path = "note_service_tests.rs"]
mod tests;
