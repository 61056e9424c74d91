//! Session repository trait defining the interface for access-token session records.

use async_trait::async_trait;

use crate::domain::entities::session::SessionRecord;
use crate::errors::DomainError;

/// Repository trait for SessionRecord persistence operations
///
/// Records are keyed by the literal access-token value. Creation is a plain
/// insert; deletion is best effort and never fails on a missing record.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a record for a freshly issued access token
    ///
    /// # Returns
    /// * `Ok(SessionRecord)` - The stored record
    /// * `Err(DomainError::Validation)` - A record for this token already exists
    async fn create(&self, record: SessionRecord) -> Result<SessionRecord, DomainError>;

    /// Find the record shadowing `token`
    async fn find_by_token(&self, token: &str) -> Result<Option<SessionRecord>, DomainError>;

    /// Delete the record for `token`
    ///
    /// # Returns
    /// * `Ok(true)` - A record was deleted
    /// * `Ok(false)` - No record existed
    async fn delete_by_token(&self, token: &str) -> Result<bool, DomainError>;

    /// Delete every record whose expiry has passed
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records removed
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
