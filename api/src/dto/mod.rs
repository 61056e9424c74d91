//! Request and response bodies

pub mod auth;

pub use auth::{AuthPayload, CredentialsRequest, ProfilePayload};
