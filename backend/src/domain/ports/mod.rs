//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `NoteRepository`, `PasswordHasher`) are
//! implemented by outbound adapters. Driving ports (`AccountCommand`,
//! `NoteCommand`, `NoteQuery`) are implemented by domain services and called
//! by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod note_command;
mod note_query;
mod note_repository;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use note_command::MockNoteCommand;
pub use note_command::{NoteCommand, NoteDraft, NotePayload};
#[cfg(test)]
pub use note_query::MockNoteQuery;
pub use note_query::{ListedNote, NoteQuery};
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{NotePersistenceError, NoteRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
