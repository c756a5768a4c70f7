//! In-memory implementations of the driven ports.
//!
//! These mirror the PostgreSQL adapters closely enough for service and HTTP
//! tests: ids are assigned sequentially, usernames are unique, and listing
//! sorts newest first before paging.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    NotePersistenceError, NoteRepository, PasswordHashError, PasswordHasher,
    UserPersistenceError, UserRepository,
};
use crate::domain::{NewNote, NewUser, Note, NoteId, NoteListQuery, User, UserId};

/// Credential store backed by a vector.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    fn users(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store mutex poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut users = self.users()?;
        if users
            .iter()
            .any(|existing| existing.username() == user.username.as_ref())
        {
            return Err(UserPersistenceError::duplicate_username(
                user.username.as_ref(),
            ));
        }
        let id = UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let created = User::new(id, user.username.as_ref(), user.password_hash.as_str());
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .users()?
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.users()?.iter().find(|user| user.id() == id).cloned())
    }
}

/// Note store backed by an ordered map.
#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Mutex<BTreeMap<NoteId, Note>>,
    next_id: AtomicI64,
    list_calls: AtomicUsize,
}

impl InMemoryNoteRepository {
    /// Number of times [`NoteRepository::list`] has run.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::Relaxed)
    }

    fn notes(&self) -> Result<MutexGuard<'_, BTreeMap<NoteId, Note>>, NotePersistenceError> {
        self.notes
            .lock()
            .map_err(|_| NotePersistenceError::query("note store mutex poisoned"))
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn insert(&self, note: &NewNote) -> Result<Note, NotePersistenceError> {
        let id = NoteId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let stored = Note::inserted(id, note.clone());
        self.notes()?.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NotePersistenceError> {
        Ok(self.notes()?.get(&id).cloned())
    }

    async fn update(&self, note: &Note) -> Result<bool, NotePersistenceError> {
        let mut notes = self.notes()?;
        match notes.get_mut(&note.id()) {
            Some(slot) => {
                *slot = note.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NotePersistenceError> {
        Ok(self.notes()?.remove(&id).is_some())
    }

    async fn list(&self, query: &NoteListQuery) -> Result<Vec<Note>, NotePersistenceError> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        let mut matching: Vec<Note> = self
            .notes()?
            .values()
            .filter(|note| query.owner.is_none_or(|owner| note.user_id() == owner))
            .filter(|note| {
                query
                    .window
                    .is_none_or(|window| window.contains(note.created_at()))
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });

        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }
}

/// Fast stand-in for Argon2 that stores passwords with a marker prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextPasswordHasher;

const PLAINTEXT_PREFIX: &str = "plain$";

impl PasswordHasher for PlaintextPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("{PLAINTEXT_PREFIX}{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        hash.strip_prefix(PLAINTEXT_PREFIX)
            .map(|stored| stored == password)
            .ok_or_else(|| PasswordHashError::corrupt_hash("missing plaintext marker"))
    }
}
