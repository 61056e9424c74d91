//! Error types for authentication and token handling

use thiserror::Error;

/// Authentication-related errors
///
/// Messages are client-facing. `InvalidCredentials` deliberately covers both
/// an unknown email and a wrong password, and `RefreshRejected` covers both
/// an expired refresh token and a replayed one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("This account was registered via SSO. Please sign in with Google or GitHub.")]
    SsoOnlyAccount,

    #[error("Unauthorized, no token")]
    MissingRefreshToken,

    #[error("Forbidden, refresh token rejected")]
    RefreshRejected,

    #[error("Session expired or revoked")]
    SessionRevoked,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::SsoOnlyAccount => "SSO_ONLY_ACCOUNT",
            AuthError::MissingRefreshToken => "MISSING_REFRESH_TOKEN",
            AuthError::RefreshRejected => "REFRESH_REJECTED",
            AuthError::SessionRevoked => "SESSION_REVOKED",
        }
    }
}

/// Token codec errors
///
/// `Expired` is kept apart from the tamper cases so callers can treat an
/// old token differently from a forged one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Malformed token")]
    Malformed,

    #[error("Token is not of the expected kind")]
    WrongKind,

    #[error("Token generation failed")]
    GenerationFailed,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::Malformed => "MALFORMED_TOKEN",
            TokenError::WrongKind => "WRONG_TOKEN_KIND",
            TokenError::GenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }

    /// Whether the token could have been genuine but simply aged out
    pub fn is_expiry(&self) -> bool {
        matches!(self, TokenError::Expired)
    }
}
