//! Session record shadowing an issued access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-side record of one issued access token
///
/// Keyed by the literal token value. Deleting the record invalidates the
/// access token even while its signature and expiry still check out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(user_id: Uuid, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            expires_at,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_expiry() {
        let live = SessionRecord::new(Uuid::new_v4(), "a".into(), Utc::now() + Duration::minutes(15));
        assert!(!live.is_expired());

        let stale = SessionRecord::new(Uuid::new_v4(), "b".into(), Utc::now() - Duration::seconds(1));
        assert!(stale.is_expired());
    }
}
