//! Business services containing domain logic and use cases.

pub mod auth;
pub mod cleanup;
pub mod rotation;
pub mod token;

// Re-export commonly used types
pub use auth::{AccessTokenVerifier, AuthService, BcryptPasswordHasher, PasswordHasher};
pub use cleanup::{CleanupResult, SessionCleanupConfig, SessionCleanupService};
pub use rotation::{RefreshRotationEngine, RevocationResult};
pub use token::{TokenService, TokenServiceConfig};
