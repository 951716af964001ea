use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The single identity the service knows about. Tokens asserting any
/// other subject are rejected outright.
pub const ADMIN_USERNAME: &str = "admin";

const TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies self-contained HS256 bearer tokens. There is no
/// server-side session table; logout is client-side discard.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a token asserting the admin identity, expiring 24 hours
    /// from now.
    pub fn issue(&self) -> Result<String> {
        self.issue_with_ttl(TOKEN_TTL_SECONDS)
    }

    fn issue_with_ttl(&self, ttl_seconds: i64) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: ADMIN_USERNAME.to_string(),
            iat: now,
            exp: now + ttl_seconds,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Config(format!("failed to sign token: {e}")))
    }

    /// Verifies a token and returns the identity it asserts. Fails on a
    /// bad signature, malformed input, expiry, or a foreign subject.
    pub fn verify(&self, token: &str) -> Result<String> {
        let data =
            decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => Error::TokenExpired,
                    _ => Error::InvalidToken,
                }
            })?;

        if data.claims.sub != ADMIN_USERNAME {
            return Err(Error::InvalidToken);
        }

        Ok(data.claims.sub)
    }

    /// Like [`verify`](Self::verify), but anonymity is valid input: a
    /// missing, malformed, or expired token resolves to `None`.
    #[must_use]
    pub fn verify_optional(&self, token: Option<&str>) -> Option<String> {
        token.and_then(|t| self.verify(t).ok())
    }
}
