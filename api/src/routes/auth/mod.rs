//! Authentication route handlers
//!
//! - Registration and password login
//! - Refresh-token rotation through the `jwt` cookie
//! - Logout
//! - Profile of the authenticated user

pub mod login;
pub mod logout;
pub mod profile;
pub mod refresh;
pub mod register;
