//! Port for one-way password hashing.

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Producing a hash failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        CorruptHash { message: String } => "stored password hash is unreadable: {message}",
    }
}

/// Hashes and verifies passwords.
///
/// Hashes are opaque strings; adapters choose the encoding.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check `password` against a stored `hash`.
    ///
    /// A mismatch is `Ok(false)`; only unreadable hashes are errors.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
