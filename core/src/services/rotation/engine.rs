//! Rotation engine implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::session::SessionRecord;
use crate::domain::entities::token::{RotatedToken, TokenKind, TokenPair};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{SessionRepository, UserRepository};
use crate::services::token::TokenService;

/// What a logout actually removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevocationResult {
    pub refresh_token_revoked: bool,
    pub session_deleted: bool,
}

/// Issues token pairs and enforces single-use refresh tokens
pub struct RefreshRotationEngine<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    users: Arc<U>,
    sessions: Arc<S>,
    tokens: Arc<TokenService>,
}

impl<U, S> RefreshRotationEngine<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            sessions,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Starts a new token family for `user_id`
    ///
    /// The active set is replaced by a set holding only the new refresh
    /// token, so every refresh token issued earlier stops working.
    pub async fn start_family(&self, user_id: Uuid) -> DomainResult<TokenPair> {
        let refresh_token = self.tokens.issue_refresh(user_id)?;
        self.users
            .replace_refresh_tokens(user_id, vec![refresh_token.clone()])
            .await?;

        let access_token = self.open_session(user_id).await?;
        debug!(user_id = %user_id, "started refresh token family");

        Ok(self.pair(user_id, access_token, refresh_token))
    }

    /// Exchanges `presented` for a new token pair
    ///
    /// Every rejection surfaces as `AuthError::RefreshRejected`; the reason
    /// is only logged.
    pub async fn rotate(&self, presented: &str) -> DomainResult<TokenPair> {
        let started = Utc::now();

        let Some(owner) = self.users.find_by_refresh_token(presented).await? else {
            return Err(self.reject_unowned(presented, started).await);
        };

        let verified = self
            .tokens
            .verify(presented, TokenKind::Refresh)
            .and_then(|v| {
                if v.user_id == owner.id {
                    Ok(v)
                } else {
                    Err(TokenError::Malformed)
                }
            });
        if let Err(error) = verified {
            self.users.remove_refresh_token(owner.id, presented).await?;
            info!(
                user_id = %owner.id,
                %error,
                expired = error.is_expiry(),
                "refresh token failed verification"
            );
            return Err(AuthError::RefreshRejected.into());
        }

        // The session is opened before the swap so a committed rotation
        // always has a deliverable pair.
        let replacement = self.tokens.issue_refresh(owner.id)?;
        let access_token = self.open_session(owner.id).await?;

        let swapped = match self
            .users
            .rotate_refresh_token(owner.id, presented, replacement.clone())
            .await
        {
            Ok(swapped) => swapped,
            Err(e) => {
                self.discard_session(&access_token).await;
                return Err(e);
            }
        };
        if !swapped {
            // Another call consumed `presented` between our lookup and the
            // swap. Its successor is legitimate and stays in the set.
            self.discard_session(&access_token).await;
            warn!(user_id = %owner.id, "concurrent refresh lost rotation race");
            return Err(AuthError::RefreshRejected.into());
        }

        debug!(user_id = %owner.id, "rotated refresh token");
        Ok(self.pair(owner.id, access_token, replacement))
    }

    /// Removes the presented credentials, each independently
    ///
    /// Missing or unknown tokens are not an error. A store failure on one
    /// credential is logged and does not stop the other from being removed.
    pub async fn revoke(
        &self,
        refresh_token: Option<&str>,
        access_token: Option<&str>,
    ) -> RevocationResult {
        let mut result = RevocationResult::default();

        if let Some(token) = refresh_token {
            match self.revoke_refresh_token(token).await {
                Ok(revoked) => result.refresh_token_revoked = revoked,
                Err(e) => warn!(code = e.code(), error = %e, "could not revoke refresh token"),
            }
        }

        if let Some(token) = access_token {
            match self.sessions.delete_by_token(token).await {
                Ok(deleted) => result.session_deleted = deleted,
                Err(e) => warn!(code = e.code(), error = %e, "could not delete session record"),
            }
        }

        result
    }

    async fn revoke_refresh_token(&self, token: &str) -> DomainResult<bool> {
        match self.users.find_by_refresh_token(token).await? {
            Some(owner) => self.users.remove_refresh_token(owner.id, token).await,
            None => Ok(false),
        }
    }

    /// Handles a token no active set contains
    ///
    /// If it still verifies it was issued by us and already rotated away.
    /// A rotation that committed while this call was running, or within the
    /// reuse grace window, is a concurrent duplicate and only rejected.
    /// Anything older is a replay: revoke the whole family.
    async fn reject_unowned(&self, presented: &str, started: DateTime<Utc>) -> DomainError {
        let verified = match self.tokens.verify(presented, TokenKind::Refresh) {
            Ok(verified) => verified,
            Err(error) => {
                debug!(%error, "unrecognized refresh token rejected");
                return AuthError::RefreshRejected.into();
            }
        };

        match self.users.find_rotated(presented).await {
            Ok(Some(rotation))
                if rotation.user_id == verified.user_id && self.is_concurrent(&rotation, started) =>
            {
                warn!(user_id = %verified.user_id, "concurrent refresh lost rotation race");
                return AuthError::RefreshRejected.into();
            }
            Ok(_) => {}
            Err(e) => return e,
        }

        match self.users.clear_refresh_tokens(verified.user_id).await {
            Ok(revoked) => {
                warn!(
                    user_id = %verified.user_id,
                    revoked,
                    "refresh token reuse detected"
                );
                AuthError::RefreshRejected.into()
            }
            Err(e) => e,
        }
    }

    fn is_concurrent(&self, rotation: &RotatedToken, started: DateTime<Utc>) -> bool {
        rotation.rotated_at >= started
            || Utc::now() - rotation.rotated_at < self.tokens.refresh_reuse_grace()
    }

    async fn discard_session(&self, access_token: &str) {
        if let Err(e) = self.sessions.delete_by_token(access_token).await {
            warn!(code = e.code(), error = %e, "could not discard unused session record");
        }
    }

    /// Mints an access token and stores the session record shadowing it
    async fn open_session(&self, user_id: Uuid) -> DomainResult<String> {
        let access_token = self.tokens.issue_access(user_id)?;
        let expires_at = self
            .tokens
            .decode_unsafe(&access_token)
            .and_then(|claims| claims.expires_at())
            .unwrap_or_else(|| Utc::now() + self.tokens.access_lifetime());

        self.sessions
            .create(SessionRecord::new(user_id, access_token.clone(), expires_at))
            .await?;
        Ok(access_token)
    }

    fn pair(&self, user_id: Uuid, access_token: String, refresh_token: String) -> TokenPair {
        TokenPair {
            user_id,
            access_token,
            refresh_token,
            access_expires_in: self.tokens.access_lifetime().num_seconds(),
            refresh_expires_in: self.tokens.refresh_lifetime().num_seconds(),
        }
    }
}
