//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::env_or;
use super::environment::Environment;

const DEFAULT_ACCESS_SECRET: &str = "parley-access-secret-change-in-production";
const DEFAULT_REFRESH_SECRET: &str = "parley-refresh-secret-change-in-production";

/// JWT signing configuration
///
/// Access and refresh tokens are signed with different secrets so that a
/// token of one kind can never be accepted as the other.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret for signing access tokens
    pub access_secret: String,

    /// Secret for signing refresh tokens
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Seconds during which a just-rotated refresh token presented again is
    /// rejected without revoking the family
    #[serde(default = "default_refresh_reuse_grace")]
    pub refresh_reuse_grace: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_ACCESS_SECRET),
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("parley"),
            refresh_reuse_grace: default_refresh_reuse_grace(),
        }
    }
}

fn default_refresh_reuse_grace() -> i64 {
    5
}

impl JwtConfig {
    /// Create a new JWT configuration with both secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if either default secret is still in use (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_secret: std::env::var("JWT_SECRET").unwrap_or(defaults.access_secret),
            refresh_secret: std::env::var("JWT_REFRESH_SECRET").unwrap_or(defaults.refresh_secret),
            access_token_expiry: env_or("JWT_ACCESS_EXPIRY_SECONDS", defaults.access_token_expiry),
            refresh_token_expiry: env_or("JWT_REFRESH_EXPIRY_SECONDS", defaults.refresh_token_expiry),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            refresh_reuse_grace: env_or(
                "JWT_REFRESH_REUSE_GRACE_SECONDS",
                defaults.refresh_reuse_grace,
            ),
        }
    }
}

/// Refresh token cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie name carrying the refresh token
    pub name: String,

    /// Secure flag (HTTPS only), off in development
    pub secure: bool,

    /// HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// Cookie path
    #[serde(default = "default_path")]
    pub path: String,

    /// Max-Age in seconds
    pub max_age: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: String::from("jwt"),
            secure: true,
            http_only: default_http_only(),
            path: default_path(),
            max_age: 7 * 24 * 60 * 60,
        }
    }
}

impl CookieConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            secure: !environment.is_development(),
            ..Default::default()
        }
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 10 }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Refresh cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookie: CookieConfig::for_environment(environment),
            password: PasswordConfig::default(),
        }
    }

    /// Create from environment variables
    pub fn from_env(environment: Environment) -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            cookie: CookieConfig::for_environment(environment),
            password: PasswordConfig {
                bcrypt_cost: env_or("BCRYPT_COST", PasswordConfig::default().bcrypt_cost),
            },
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

fn default_http_only() -> bool {
    true
}

fn default_path() -> String {
    String::from("/")
}
