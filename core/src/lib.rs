//! # Parley Core
//!
//! Core domain layer for the Parley authentication backend.
//! This crate contains the domain entities, the token codec, the refresh
//! rotation engine, repository interfaces with their in-memory stores, and
//! the error types surfaced to the HTTP layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, RotatedToken, SessionRecord, TokenKind, TokenPair, User, UserProfile, VerifiedToken,
};
pub use domain::value_objects::AuthContext;
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{
    InMemorySessionRepository, InMemoryUserRepository, SessionRepository, UserRepository,
};
pub use services::{
    AccessTokenVerifier, AuthService, BcryptPasswordHasher, CleanupResult, PasswordHasher,
    RefreshRotationEngine, RevocationResult, SessionCleanupConfig, SessionCleanupService,
    TokenService, TokenServiceConfig,
};
