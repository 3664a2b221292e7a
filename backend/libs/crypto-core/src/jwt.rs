/// Identity token issuing and validation for Vine services
///
/// Tokens are HS256-signed JWTs whose payload carries the user reference as
/// `{ "user": { "id": "<uuid>" } }` next to the standard `iat`/`exp` claims.
///
/// ## Usage
///
/// Keys are built once at startup from configuration and shared with every
/// component that issues or checks tokens:
///
/// ```rust
/// use crypto_core::jwt::JwtKeys;
/// use uuid::Uuid;
///
/// let keys = JwtKeys::new("change-me", 360_000);
/// let token = keys.issue(Uuid::new_v4()).unwrap();
/// let user_id = keys.user_id_from_token(&token).unwrap();
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

/// Default token lifetime (~100 hours)
pub const DEFAULT_EXPIRY_SECS: i64 = 360_000;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// Reference to the authenticated user embedded in the token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenUser {
    pub id: Uuid,
}

/// JWT claims: `{ user: { id }, iat, exp }`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user: TokenUser,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token invalid: {0}")]
    Invalid(String),
    #[error("token signing failed: {0}")]
    Signing(String),
}

// ============================================================================
// Keys
// ============================================================================

/// Signing/verification keys plus the configured token lifetime
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_secs: i64,
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("secret", &"[REDACTED]")
            .field("expiry_secs", &self.expiry_secs)
            .finish()
    }
}

impl JwtKeys {
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
        }
    }

    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }

    /// Issue a token for `user_id` valid for the configured lifetime
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue_with_lifetime(user_id, Duration::seconds(self.expiry_secs))
    }

    fn issue_with_lifetime(&self, user_id: Uuid, lifetime: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            user: TokenUser { id: user_id },
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the decoded claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }

    /// Extract the user reference from a validated token
    pub fn user_id_from_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.validate(token).map(|claims| claims.user.id)
    }
}
