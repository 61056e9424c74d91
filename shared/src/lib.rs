//! Shared utilities and common types for the Parley server
//!
//! This crate provides functionality used by both the core and API crates:
//! - Configuration types loaded from the environment
//! - The JSON response envelope returned by every endpoint
//! - Email normalization and validation helpers

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CookieConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    PasswordConfig, ServerConfig, SessionStoreConfig,
};
pub use types::{ApiResponse, HealthResponse};
pub use utils::validation;
