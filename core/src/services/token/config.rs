//! Configuration for the token service

use chrono::Duration;

use parley_shared::JwtConfig;

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_REUSE_GRACE_SECONDS, REFRESH_TOKEN_EXPIRY_DAYS,
};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,
    /// Secret used to sign refresh tokens
    pub refresh_secret: String,
    /// Access token lifetime
    pub access_lifetime: Duration,
    /// Refresh token lifetime
    pub refresh_lifetime: Duration,
    /// Value of the `iss` claim, checked on verification
    pub issuer: String,
    /// Window after a rotation in which the old token counts as a
    /// concurrent duplicate instead of a replay
    pub refresh_reuse_grace: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_secret: "development-access-secret-change-in-production".to_string(),
            refresh_secret: "development-refresh-secret-change-in-production".to_string(),
            access_lifetime: Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
            refresh_lifetime: Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
            issuer: "parley".to_string(),
            refresh_reuse_grace: Duration::seconds(REFRESH_REUSE_GRACE_SECONDS),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            access_lifetime: Duration::seconds(config.access_token_expiry),
            refresh_lifetime: Duration::seconds(config.refresh_token_expiry),
            issuer: config.issuer.clone(),
            refresh_reuse_grace: Duration::seconds(config.refresh_reuse_grace.max(0)),
        }
    }
}
