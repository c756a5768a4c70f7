//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::web;
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{AccountService, NoteService, TokenService, UserId};
use crate::test_support::{
    InMemoryNoteRepository, InMemoryUserRepository, MutableClock, PlaintextPasswordHasher,
};

use super::auth::TOKEN_COOKIE;
use super::state::{HttpState, HttpStatePorts, SessionSettings};

pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret";
pub const TEST_ISSUER: &str = "notes-tests";

/// Fixed instant tests start from.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixed instant")
}

/// Handler state wired to in-memory stores and a controllable clock.
///
/// Ports default to the real services; swap them for mocks with
/// [`TestHarness::with_ports`].
pub struct TestHarness {
    pub tokens: TokenService,
    pub clock: Arc<MutableClock>,
    pub users: Arc<InMemoryUserRepository>,
    pub notes: Arc<InMemoryNoteRepository>,
    ports: HttpStatePorts,
}

impl TestHarness {
    pub fn new() -> Self {
        let tokens = TokenService::new(TEST_SECRET, TEST_ISSUER).expect("test secret is valid");
        let clock = Arc::new(MutableClock::new(epoch()));
        let users = Arc::new(InMemoryUserRepository::default());
        let notes = Arc::new(InMemoryNoteRepository::default());
        let accounts = Arc::new(AccountService::new(
            users.clone(),
            Arc::new(PlaintextPasswordHasher),
            tokens.clone(),
            clock.clone(),
        ));
        let note_service = Arc::new(NoteService::new(users.clone(), notes.clone(), clock.clone()));
        let ports = HttpStatePorts {
            accounts,
            notes: note_service.clone(),
            notes_query: note_service,
        };
        Self {
            tokens,
            clock,
            users,
            notes,
            ports,
        }
    }

    /// Replace the driving ports, typically with mocks.
    pub fn with_ports(mut self, ports: HttpStatePorts) -> Self {
        self.ports = ports;
        self
    }

    pub fn state(&self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            self.ports.clone(),
            SessionSettings {
                tokens: self.tokens.clone(),
                clock: self.clock.clone(),
                cookie_secure: false,
            },
        ))
    }
}

/// A `token` cookie for `user_id`, valid at the harness clock's current time.
pub fn token_cookie(harness: &TestHarness, user_id: UserId) -> Cookie<'static> {
    let token = harness
        .tokens
        .issue(user_id, harness.clock.utc())
        .expect("issue test token");
    Cookie::new(TOKEN_COOKIE, String::from(token))
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
