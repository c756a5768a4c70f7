//! Token cookie handling for HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! credential checks and user identity derivation here. Handlers that need an
//! authenticated caller take an [`AuthenticatedUser`] argument; the extractor
//! rejects the request with `401` before the handler body runs.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, SESSION_TTL_SECS, SessionToken, TokenError, UserId};

use super::state::HttpState;

/// Cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Identity of the caller, proven by a valid `token` cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn id(self) -> UserId {
        self.0
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let cookie = req
        .cookie(TOKEN_COOKIE)
        .ok_or_else(|| Error::unauthorized("authentication required"))?;

    match state.tokens.verify(cookie.value(), state.clock.utc()) {
        Ok(user_id) => Ok(AuthenticatedUser(user_id)),
        Err(TokenError::InvalidToken(reason)) => {
            debug!(%reason, "rejected session token");
            Err(Error::unauthorized("invalid or expired token"))
        }
        Err(other) => Err(Error::internal(other.to_string())),
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(actix_web::Error::from))
    }
}

/// Build the `token` cookie handed out at signin.
pub fn session_cookie(token: &SessionToken, secure: bool) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token.as_str().to_owned())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(SESSION_TTL_SECS))
        .finish()
}
