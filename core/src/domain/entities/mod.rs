//! Domain entities representing core business objects.

pub mod session;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use session::SessionRecord;
pub use token::{
    Claims, RotatedToken, TokenKind, TokenPair, VerifiedToken, ACCESS_TOKEN_EXPIRY_MINUTES,
    REFRESH_TOKEN_EXPIRY_DAYS, REFRESH_REUSE_GRACE_SECONDS,
};
pub use user::{User, UserProfile};
