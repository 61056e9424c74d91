//! Authenticated principal attached to a request.

use uuid::Uuid;

/// Identity established by verifying a bearer access token against its
/// signature, its expiry and a live session record
///
/// Downstream handlers only ever see the user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
}

impl AuthContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
