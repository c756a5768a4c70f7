//! Stateless session tokens.
//!
//! Tokens use the JWT compact form signed with HMAC-SHA256:
//! `base64url(header).base64url(claims).base64url(signature)`. Only `HS256`
//! is accepted on the way back in, the issuer must match exactly, and a token
//! is rejected once `now >= exp`.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use super::UserId;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of an issued token in seconds.
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Issuer used when configuration does not override it.
pub const DEFAULT_TOKEN_ISSUER: &str = "vkNotesSolid";

const ALGORITHM: &str = "HS256";

/// Why a presented token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenReason {
    Malformed,
    UnsupportedAlgorithm,
    BadSignature,
    IssuerMismatch,
    Expired,
}

impl fmt::Display for InvalidTokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Malformed => "malformed",
            Self::UnsupportedAlgorithm => "unsupported algorithm",
            Self::BadSignature => "signature mismatch",
            Self::IssuerMismatch => "issuer mismatch",
            Self::Expired => "expired",
        };
        f.write_str(text)
    }
}

/// Errors raised while issuing or verifying tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("invalid session token: {0}")]
    InvalidToken(InvalidTokenReason),
    #[error("token signing key is unusable: {message}")]
    InvalidKey { message: String },
    #[error("failed to encode session token: {message}")]
    Encoding { message: String },
}

/// Signed credential handed to a client after signin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: i64,
    iat: i64,
    exp: i64,
    iss: String,
}

/// Issues and verifies session tokens with a shared secret.
///
/// # Examples
/// ```
/// use backend::domain::{TokenService, UserId};
/// use chrono::Utc;
///
/// let tokens = TokenService::new(b"0123456789abcdef0123456789abcdef", "notes").unwrap();
/// let now = Utc::now();
/// let token = tokens.issue(UserId::new(1), now).unwrap();
/// assert_eq!(tokens.verify(token.as_str(), now), Ok(UserId::new(1)));
/// ```
#[derive(Clone)]
pub struct TokenService {
    key: Zeroizing<Vec<u8>>,
    issuer: String,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl TokenService {
    /// Build a service from the signing secret and expected issuer.
    pub fn new(secret: impl AsRef<[u8]>, issuer: impl Into<String>) -> Result<Self, TokenError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(TokenError::InvalidKey {
                message: "secret must not be empty".to_owned(),
            });
        }
        Ok(Self {
            key: Zeroizing::new(secret.to_vec()),
            issuer: issuer.into(),
        })
    }

    pub fn issuer(&self) -> &str {
        self.issuer.as_str()
    }

    /// Issue a token for `user_id` valid for [`SESSION_TTL_SECS`] from `now`.
    pub fn issue(&self, user_id: UserId, now: DateTime<Utc>) -> Result<SessionToken, TokenError> {
        let iat = now.timestamp();
        let claims = Claims {
            user_id: user_id.as_i64(),
            iat,
            exp: iat.saturating_add(SESSION_TTL_SECS),
            iss: self.issuer.clone(),
        };
        let header = Header {
            alg: ALGORITHM.to_owned(),
            typ: "JWT".to_owned(),
        };

        let signing_input = format!("{}.{}", encode_json(&header)?, encode_json(&claims)?);
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(SessionToken(format!("{signing_input}.{signature}")))
    }

    /// Check `token` and return the user it was issued to.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let (signing_input, signature) = token
            .rsplit_once('.')
            .ok_or_else(|| invalid(InvalidTokenReason::Malformed))?;
        let (header, claims) = signing_input
            .split_once('.')
            .filter(|(_, claims)| !claims.contains('.'))
            .ok_or_else(|| invalid(InvalidTokenReason::Malformed))?;

        let header: Header = decode_json(header)?;
        if header.alg != ALGORITHM {
            return Err(invalid(InvalidTokenReason::UnsupportedAlgorithm));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| invalid(InvalidTokenReason::Malformed))?;
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| invalid(InvalidTokenReason::BadSignature))?;

        let claims: Claims = decode_json(claims)?;
        if claims.iss != self.issuer {
            return Err(invalid(InvalidTokenReason::IssuerMismatch));
        }
        if now.timestamp() >= claims.exp {
            return Err(invalid(InvalidTokenReason::Expired));
        }

        Ok(UserId::new(claims.user_id))
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.key).map_err(|err| TokenError::InvalidKey {
            message: err.to_string(),
        })
    }
}

/// Session lifetime as a duration.
pub fn session_ttl() -> TimeDelta {
    TimeDelta::seconds(SESSION_TTL_SECS)
}

fn invalid(reason: InvalidTokenReason) -> TokenError {
    TokenError::InvalidToken(reason)
}

fn encode_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let bytes = serde_json::to_vec(value).map_err(|err| TokenError::Encoding {
        message: err.to_string(),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

fn decode_json<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| invalid(InvalidTokenReason::Malformed))?;
    serde_json::from_slice(&bytes).map_err(|_| invalid(InvalidTokenReason::Malformed))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[fixture]
    fn tokens() -> TokenService {
        TokenService::new(SECRET, DEFAULT_TOKEN_ISSUER).expect("valid key")
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .expect("RFC3339 fixture timestamp")
            .with_timezone(&Utc)
    }

    #[rstest]
    fn issued_token_verifies(tokens: TokenService, now: DateTime<Utc>) {
        let token = tokens.issue(UserId::new(42), now).expect("issue");
        assert_eq!(token.as_str().split('.').count(), 3);
        assert_eq!(tokens.verify(token.as_str(), now), Ok(UserId::new(42)));
    }

    #[rstest]
    #[case(TimeDelta::hours(23), true)]
    #[case(TimeDelta::seconds(SESSION_TTL_SECS - 1), true)]
    #[case(TimeDelta::seconds(SESSION_TTL_SECS), false)]
    #[case(TimeDelta::hours(25), false)]
    fn expiry_is_exclusive(
        tokens: TokenService,
        now: DateTime<Utc>,
        #[case] elapsed: TimeDelta,
        #[case] valid: bool,
    ) {
        let token = tokens.issue(UserId::new(1), now).expect("issue");
        let result = tokens.verify(token.as_str(), now + elapsed);
        if valid {
            assert_eq!(result, Ok(UserId::new(1)));
        } else {
            assert_eq!(result, Err(invalid(InvalidTokenReason::Expired)));
        }
    }

    #[rstest]
    fn other_issuer_is_rejected(tokens: TokenService, now: DateTime<Utc>) {
        let foreign = TokenService::new(SECRET, "someone-else").expect("valid key");
        let token = foreign.issue(UserId::new(1), now).expect("issue");
        assert_eq!(
            tokens.verify(token.as_str(), now),
            Err(invalid(InvalidTokenReason::IssuerMismatch))
        );
    }

    #[rstest]
    fn other_key_is_rejected(tokens: TokenService, now: DateTime<Utc>) {
        let foreign =
            TokenService::new(b"another-secret-another-secret-00", DEFAULT_TOKEN_ISSUER)
                .expect("valid key");
        let token = foreign.issue(UserId::new(1), now).expect("issue");
        assert_eq!(
            tokens.verify(token.as_str(), now),
            Err(invalid(InvalidTokenReason::BadSignature))
        );
    }

    #[rstest]
    fn tampered_claims_are_rejected(tokens: TokenService, now: DateTime<Utc>) {
        let token = tokens.issue(UserId::new(1), now).expect("issue");
        let (header, rest) = token.as_str().split_once('.').expect("header segment");
        let (_, signature) = rest.split_once('.').expect("signature segment");
        let forged_claims = URL_SAFE_NO_PAD.encode(
            format!(
                r#"{{"user_id":2,"iat":{},"exp":{},"iss":"{DEFAULT_TOKEN_ISSUER}"}}"#,
                now.timestamp(),
                now.timestamp() + SESSION_TTL_SECS
            )
            .as_bytes(),
        );
        let forged = format!("{header}.{forged_claims}.{signature}");
        assert_eq!(
            tokens.verify(&forged, now),
            Err(invalid(InvalidTokenReason::BadSignature))
        );
    }

    #[rstest]
    fn none_algorithm_is_rejected(tokens: TokenService, now: DateTime<Utc>) {
        let token = tokens.issue(UserId::new(1), now).expect("issue");
        let claims = token.as_str().split('.').nth(1).expect("claims segment");
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let forged = format!("{header}.{claims}.");
        assert_eq!(
            tokens.verify(&forged, now),
            Err(invalid(InvalidTokenReason::UnsupportedAlgorithm))
        );
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("a.b")]
    #[case("a.b.c.d")]
    #[case("!!!.???.###")]
    fn garbage_is_malformed(tokens: TokenService, now: DateTime<Utc>, #[case] raw: &str) {
        assert_eq!(
            tokens.verify(raw, now),
            Err(invalid(InvalidTokenReason::Malformed))
        );
    }

    #[rstest]
    fn empty_secret_is_refused() {
        assert!(matches!(
            TokenService::new(b"", DEFAULT_TOKEN_ISSUER),
            Err(TokenError::InvalidKey { .. })
        ));
    }

    #[rstest]
    fn debug_output_redacts_key(tokens: TokenService) {
        let rendered = format!("{tokens:?}");
        assert!(!rendered.contains("0123456789abcdef"));
    }
}
