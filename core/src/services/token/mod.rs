//! Token service module for JWT management
//!
//! Mints and verifies the two credential kinds. Access and refresh tokens
//! are signed with separate secrets and tagged with a `typ` claim, so a
//! token of one kind never verifies as the other.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
