//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Compiled
//! for tests and when the `test-support` feature is enabled.

pub mod clock;
pub mod stores;

pub use clock::MutableClock;
pub use stores::{InMemoryNoteRepository, InMemoryUserRepository, PlaintextPasswordHasher};
