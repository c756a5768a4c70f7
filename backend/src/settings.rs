//! Service configuration loaded via OrthoConfig.
//!
//! Values come from command-line flags, `NOTES_*` environment variables or a
//! configuration file, in that order of precedence. [`AppSettings::validate`]
//! turns the raw values into a [`ServiceSettings`] that startup code can use
//! without further checks.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_NOTE_MAX_LENGTH, DEFAULT_TOKEN_ISSUER};
use crate::outbound::persistence::NOTE_TITLE_COLUMN_CHARS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
/// Minimum signing secret length enforced in release builds.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTES")]
pub struct AppSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// HS256 signing secret for session tokens.
    pub jwt_secret: Option<String>,
    /// `iss` claim written into and required from session tokens.
    pub token_issuer: Option<String>,
    /// Maximum characters in a note title or text.
    pub note_max_length: Option<usize>,
    /// Upper bound of the database connection pool.
    pub db_max_connections: Option<u32>,
    /// Mark the `token` cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
}

/// Configuration problems detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{name} must be set")]
    Missing { name: &'static str },
    #[error("bind address {value:?} is not a socket address")]
    InvalidBindAddr { value: String },
    #[error("jwt secret must be at least {min} bytes, got {actual}")]
    JwtSecretTooShort { min: usize, actual: usize },
    #[error("{name} must be greater than zero")]
    NotPositive { name: &'static str },
    #[error("note_max_length must be at most {max}, got {actual}")]
    NoteMaxLengthTooLarge { max: usize, actual: usize },
}

/// Validated configuration.
#[derive(Clone)]
pub struct ServiceSettings {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_issuer: String,
    pub note_max_length: usize,
    pub db_max_connections: u32,
    pub cookie_secure: bool,
}

impl std::fmt::Debug for ServiceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("token_issuer", &self.token_issuer)
            .field("note_max_length", &self.note_max_length)
            .field("db_max_connections", &self.db_max_connections)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

fn required(value: Option<&str>, name: &'static str) -> Result<String, SettingsError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or(SettingsError::Missing { name })
}

fn positive<T: Default + PartialOrd>(value: T, name: &'static str) -> Result<T, SettingsError> {
    if value > T::default() {
        Ok(value)
    } else {
        Err(SettingsError::NotPositive { name })
    }
}

impl AppSettings {
    /// Check values and apply defaults.
    ///
    /// With `strict_secret` the signing secret must be at least
    /// [`MIN_JWT_SECRET_BYTES`] long; startup passes `true` in release builds.
    pub fn validate(&self, strict_secret: bool) -> Result<ServiceSettings, SettingsError> {
        let raw_addr = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|_| SettingsError::InvalidBindAddr {
                value: raw_addr.to_owned(),
            })?;
        let database_url = required(self.database_url.as_deref(), "database_url")?;
        let jwt_secret = self
            .jwt_secret
            .clone()
            .filter(|v| !v.trim().is_empty())
            .ok_or(SettingsError::Missing { name: "jwt_secret" })?;
        if strict_secret && jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(SettingsError::JwtSecretTooShort {
                min: MIN_JWT_SECRET_BYTES,
                actual: jwt_secret.len(),
            });
        }
        let token_issuer = self
            .token_issuer
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_TOKEN_ISSUER)
            .to_owned();
        let note_max_length = positive(
            self.note_max_length.unwrap_or(DEFAULT_NOTE_MAX_LENGTH),
            "note_max_length",
        )?;
        if note_max_length > NOTE_TITLE_COLUMN_CHARS {
            return Err(SettingsError::NoteMaxLengthTooLarge {
                max: NOTE_TITLE_COLUMN_CHARS,
                actual: note_max_length,
            });
        }
        let db_max_connections = positive(
            self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            "db_max_connections",
        )?;

        Ok(ServiceSettings {
            bind_addr,
            database_url,
            jwt_secret,
            token_issuer,
            note_max_length,
            db_max_connections,
            cookie_secure: self.cookie_secure,
        })
    }
}
