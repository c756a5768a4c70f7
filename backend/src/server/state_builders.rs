//! Builders wiring outbound adapters into domain services and HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use backend::domain::{AccountService, NoteService, TokenService};
use backend::inbound::http::state::{HttpState, HttpStatePorts, SessionSettings};
use backend::outbound::password::Argon2PasswordHasher;
use backend::outbound::persistence::{DbPool, DieselNoteRepository, DieselUserRepository};
use backend::settings::ServiceSettings;

/// Assemble handler state over PostgreSQL repositories and Argon2 hashing.
pub fn build_http_state(
    settings: &ServiceSettings,
    pool: &DbPool,
    tokens: TokenService,
) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let notes = Arc::new(DieselNoteRepository::new(pool.clone()));

    let accounts = Arc::new(AccountService::new(
        users.clone(),
        Arc::new(Argon2PasswordHasher),
        tokens.clone(),
        clock.clone(),
    ));
    let note_service = Arc::new(
        NoteService::new(users, notes, clock.clone()).with_max_length(settings.note_max_length),
    );

    HttpState::new(
        HttpStatePorts {
            accounts,
            notes: note_service.clone(),
            notes_query: note_service,
        },
        SessionSettings {
            tokens,
            clock,
            cookie_secure: settings.cookie_secure,
        },
    )
}
