//! Response helpers shared by the route handlers

pub mod cookies;
pub mod error;

pub use cookies::{read_refresh_cookie, refresh_cookie, removal_cookie};
pub use error::{handle_domain_error, ApiError};
