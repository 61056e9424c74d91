//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// How long a rotated-away refresh token is treated as a concurrent
/// duplicate rather than a replay
pub const REFRESH_REUSE_GRACE_SECONDS: i64 = 5;

/// Which of the two credentials a JWT represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived bearer credential
    Access,
    /// Long-lived credential exchanged for a new pair
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID, unique per minted token so two tokens issued in the same
    /// second for the same user never share a value
    pub jti: String,

    /// Token kind
    pub typ: TokenKind,
}

impl Claims {
    /// Creates new claims for a token of the given kind
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `kind` - Access or refresh
    /// * `lifetime` - How long the token stays valid from now
    /// * `issuer` - Issuer claim
    pub fn new(user_id: Uuid, kind: TokenKind, lifetime: Duration, issuer: &str) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
            typ: kind,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Expiry as a timestamp, `None` if `exp` is out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Identity recovered from a token whose signature and expiry were checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub kind: TokenKind,
}

/// Token pair handed out on register, login and refresh
///
/// The access token goes into the response body; the refresh token is only
/// ever sent back as the HTTP-only cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Owner of both tokens
    pub user_id: Uuid,

    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

/// A refresh token that was swapped out of an active set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatedToken {
    /// Owner of the active set
    pub user_id: Uuid,
    /// Token that replaced it
    pub successor: String,
    /// When the swap committed
    pub rotated_at: DateTime<Utc>,
}
