//! Account domain service: signup and signin.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{AccountCommand, PasswordHasher, UserRepository};
use crate::domain::service_errors::{field_error, map_hash_error, map_user_error};
use crate::domain::{
    Error, LoginCredentials, NewUser, SessionToken, SignupCredentials, TokenService, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Account service implementing the [`AccountCommand`] driving port.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: TokenService,
    clock: Arc<dyn Clock>,
}

impl<U, H> AccountService<U, H> {
    /// Create a service over the credential store and hasher.
    pub fn new(
        users: Arc<U>,
        hasher: Arc<H>,
        tokens: TokenService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

#[async_trait]
impl<U, H> AccountCommand for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn signup(&self, credentials: SignupCredentials) -> Result<UserId, Error> {
        let username = credentials.username().clone();
        let existing = self
            .users
            .find_by_username(username.as_ref())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(field_error(
                "username",
                "username_taken",
                format!("username {username} is already taken"),
            ));
        }

        let password_hash = self
            .hasher
            .hash(credentials.password())
            .map_err(map_hash_error)?;
        let user = self
            .users
            .create(&NewUser {
                username,
                password_hash,
            })
            .await
            .map_err(map_user_error)?;

        info!(user_id = %user.id(), "account created");
        Ok(user.id())
    }

    async fn signin(&self, credentials: LoginCredentials) -> Result<SessionToken, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            debug!("signin for unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user_id = %user.id(), "signin with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.tokens
            .issue(user.id(), self.clock.utc())
            .map_err(|err| Error::internal(err.to_string()))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
