//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::TokenService;
use crate::domain::ports::{AccountCommand, NoteCommand, NoteQuery};

/// Parameter object bundling the driving ports used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub notes: Arc<dyn NoteCommand>,
    pub notes_query: Arc<dyn NoteQuery>,
}

/// Token verification inputs for the session extractor and cookie settings.
#[derive(Clone)]
pub struct SessionSettings {
    pub tokens: TokenService,
    pub clock: Arc<dyn Clock>,
    /// Mark the `token` cookie `Secure`; disable only for plain-HTTP local runs.
    pub cookie_secure: bool,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub notes: Arc<dyn NoteCommand>,
    pub notes_query: Arc<dyn NoteQuery>,
    pub tokens: TokenService,
    pub clock: Arc<dyn Clock>,
    pub cookie_secure: bool,
}

impl HttpState {
    /// Construct state from the ports bundle and session settings.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{AccountService, NoteService, TokenService};
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts, SessionSettings};
    /// use backend::outbound::password::Argon2PasswordHasher;
    /// use backend::test_support::{InMemoryNoteRepository, InMemoryUserRepository};
    /// use mockable::DefaultClock;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let users = Arc::new(InMemoryUserRepository::default());
    /// let notes = Arc::new(NoteService::new(
    ///     users.clone(),
    ///     Arc::new(InMemoryNoteRepository::default()),
    ///     clock.clone(),
    /// ));
    /// let tokens = TokenService::new("0123456789abcdef0123456789abcdef", "notes").unwrap();
    /// let accounts = Arc::new(AccountService::new(
    ///     users,
    ///     Arc::new(Argon2PasswordHasher),
    ///     tokens.clone(),
    ///     clock.clone(),
    /// ));
    /// let state = HttpState::new(
    ///     HttpStatePorts { accounts, notes: notes.clone(), notes_query: notes },
    ///     SessionSettings { tokens, clock, cookie_secure: true },
    /// );
    /// assert!(state.cookie_secure);
    /// ```
    pub fn new(ports: HttpStatePorts, session: SessionSettings) -> Self {
        let HttpStatePorts {
            accounts,
            notes,
            notes_query,
        } = ports;
        let SessionSettings {
            tokens,
            clock,
            cookie_secure,
        } = session;
        Self {
            accounts,
            notes,
            notes_query,
            tokens,
            clock,
            cookie_secure,
        }
    }
}
