//! Authentication service module
//!
//! Account registration and password login, the refresh and logout flows
//! built on the rotation engine, profile lookup, and access-token
//! authentication for the HTTP bearer gate.

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use service::{AccessTokenVerifier, AuthService};
