//! User repository trait defining the interface for credential persistence.
//!
//! Besides plain user lookups, this trait owns every mutation of a user's
//! active refresh-token set. Each mutation is a single atomic operation so
//! that concurrent refresh calls against the same user are linearized by
//! the store rather than by the caller.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RotatedToken;
use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations must keep a reverse index from refresh-token value to
/// owning user alongside the active sets, so `find_by_refresh_token` never
/// scans all users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - Email taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find the user whose active set currently contains `token`
    ///
    /// # Returns
    /// * `Ok(Some(User))` - Token is active and owned by this user
    /// * `Ok(None)` - Token is in no active set (rotated away, revoked or unknown)
    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, DomainError>;

    /// Replace the whole active set with `tokens`
    ///
    /// Used by register/login, which start a fresh token family.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No such user
    async fn replace_refresh_tokens(&self, user_id: Uuid, tokens: Vec<String>) -> Result<(), DomainError>;

    /// Atomically swap `presented` for `replacement` in the active set
    ///
    /// This is a compare-and-swap keyed on membership of `presented`: the
    /// swap only happens if `presented` is still in the set at the moment
    /// of the write. A successful swap also records `presented` as rotated,
    /// see `find_rotated`.
    ///
    /// # Returns
    /// * `Ok(true)` - Rotated; the set is now `(old - presented) + replacement`
    /// * `Ok(false)` - `presented` was no longer in the set; nothing changed
    async fn rotate_refresh_token(
        &self,
        user_id: Uuid,
        presented: &str,
        replacement: String,
    ) -> Result<bool, DomainError>;

    /// Recent rotation of `token`, if one is still on record
    ///
    /// Rotation records are kept for a bounded time only.
    ///
    /// # Returns
    /// * `Ok(Some(RotatedToken))` - `token` was swapped out recently
    /// * `Ok(None)` - Never rotated, or the record has aged out
    async fn find_rotated(&self, token: &str) -> Result<Option<RotatedToken>, DomainError>;

    /// Remove a single token from the active set
    ///
    /// # Returns
    /// * `Ok(true)` - Token was removed
    /// * `Ok(false)` - Token was not in the set
    async fn remove_refresh_token(&self, user_id: Uuid, token: &str) -> Result<bool, DomainError>;

    /// Empty the active set
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens revoked (zero for an unknown user)
    async fn clear_refresh_tokens(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Current active set of a user, empty if the user does not exist
    async fn active_refresh_tokens(&self, user_id: Uuid) -> Result<Vec<String>, DomainError> {
        Ok(self
            .find_by_id(user_id)
            .await?
            .map(|user| user.refresh_tokens.into_iter().collect())
            .unwrap_or_default())
    }
}
