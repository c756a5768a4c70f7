//! Driving port for account use-cases.
//!
//! Inbound adapters register and authenticate users through this port
//! without importing persistence or hashing infrastructure, so handler tests
//! can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SessionToken, SignupCredentials, UserId};

/// Domain use-case port for signup and signin.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a new account and return its id.
    ///
    /// A taken username is an invalid request with code `username_taken` in
    /// the error details.
    async fn signup(&self, credentials: SignupCredentials) -> Result<UserId, Error>;

    /// Verify credentials and issue a session token.
    ///
    /// Unknown users and wrong passwords produce the same unauthorised error.
    async fn signin(&self, credentials: LoginCredentials) -> Result<SessionToken, Error>;
}
