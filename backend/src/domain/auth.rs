//! Authentication primitives: signin and signup credentials.
//!
//! Handlers turn raw JSON strings into these types before talking to a port,
//! so services only ever see validated input. Passwords are held in
//! [`Zeroizing`] buffers and wiped on drop.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

use super::user::{UserValidationError, Username};

/// Domain error returned when signin payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl LoginValidationError {
    /// Payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Credentials presented at signin.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "secret1").unwrap();
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Minimum allowed password length.
pub const PASSWORD_MIN: usize = 6;
/// Maximum allowed password length.
pub const PASSWORD_MAX: usize = 20;

static PASSWORD_RE: OnceLock<Regex> = OnceLock::new();

fn password_regex() -> &'static Regex {
    PASSWORD_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_!?@#$%^&*()\-+=]+$")
            .unwrap_or_else(|error| panic!("password regex failed to compile: {error}"))
    })
}

/// Validation failures for a signup payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    Username(UserValidationError),
    PasswordTooShort { min: usize },
    PasswordTooLong { max: usize },
    PasswordInvalidCharacters,
}

impl SignupValidationError {
    /// Payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Username(_) => "username",
            _ => "password",
        }
    }

    /// Stable machine-readable code used in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Username(err) => err.code(),
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::PasswordTooLong { .. } => "password_too_long",
            Self::PasswordInvalidCharacters => "password_invalid_characters",
        }
    }
}

impl fmt::Display for SignupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => err.fmt(f),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} characters")
            }
            Self::PasswordInvalidCharacters => write!(
                f,
                "password may only contain Latin letters, digits, or _!?@#$%^&*()-+=",
            ),
        }
    }
}

impl std::error::Error for SignupValidationError {}

impl From<UserValidationError> for SignupValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Username(value)
    }
}

/// Credentials presented at signup, already shape-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl SignupCredentials {
    /// Validate raw signup inputs.
    ///
    /// ```
    /// use backend::domain::SignupCredentials;
    ///
    /// assert!(SignupCredentials::try_from_parts("alice", "s3cret!").is_ok());
    /// assert!(SignupCredentials::try_from_parts("alice", "short").is_err());
    /// ```
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, SignupValidationError> {
        let username = Username::new(username)?;

        let length = password.chars().count();
        if length < PASSWORD_MIN {
            return Err(SignupValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(SignupValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        if !password_regex().is_match(password) {
            return Err(SignupValidationError::PasswordInvalidCharacters);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("alice", "", LoginValidationError::EmptyPassword)]
    fn login_rejects_blank_fields(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(expected)
        );
    }

    #[rstest]
    fn login_keeps_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("alice", " pw ").expect("valid");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    #[case("alice", "abc123")]
    #[case("alice", "P@ssw0rd_+=()")]
    #[case("alice", "abcdefghij0123456789")]
    fn signup_accepts_valid_passwords(#[case] username: &str, #[case] password: &str) {
        let creds = SignupCredentials::try_from_parts(username, password).expect("valid");
        assert_eq!(creds.username().as_ref(), username);
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("al", "abc123", "username", "username_too_short")]
    #[case("alice", "abc12", "password", "password_too_short")]
    #[case("alice", "abcdefghij0123456789x", "password", "password_too_long")]
    #[case("alice", "pass word", "password", "password_invalid_characters")]
    #[case("alice", "пароль123", "password", "password_invalid_characters")]
    fn signup_reports_field_and_code(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = SignupCredentials::try_from_parts(username, password).expect_err("invalid");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), code);
    }
}
