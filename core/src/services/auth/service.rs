//! Main authentication service implementation

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use parley_shared::validation::{is_valid_email, is_valid_password, normalize_email};
use parley_shared::validation::{PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH};

use crate::domain::entities::token::{TokenKind, TokenPair};
use crate::domain::entities::user::{User, UserProfile};
use crate::domain::value_objects::AuthContext;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{SessionRepository, UserRepository};
use crate::services::rotation::{RefreshRotationEngine, RevocationResult};
use crate::services::token::TokenService;

use super::password::PasswordHasher;

/// Resolves a bearer access token to the authenticated principal
#[async_trait]
pub trait AccessTokenVerifier: Send + Sync {
    async fn authenticate(&self, access_token: &str) -> DomainResult<AuthContext>;
}

/// Authentication service for the register, login, refresh and logout flows
pub struct AuthService<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    /// User repository for credential storage
    user_repository: Arc<U>,
    /// Session repository for access-token records
    session_repository: Arc<S>,
    /// Password hasher
    hasher: Arc<H>,
    /// Token issuing and refresh rotation
    rotation: RefreshRotationEngine<U, S>,
}

impl<U, S, H> AuthService<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for users and their active refresh tokens
    /// * `session_repository` - Repository for access-token session records
    /// * `token_service` - JWT codec
    /// * `hasher` - Password hasher
    pub fn new(
        user_repository: Arc<U>,
        session_repository: Arc<S>,
        token_service: Arc<TokenService>,
        hasher: Arc<H>,
    ) -> Self {
        let rotation = RefreshRotationEngine::new(
            user_repository.clone(),
            session_repository.clone(),
            token_service,
        );

        Self {
            user_repository,
            session_repository,
            hasher,
            rotation,
        }
    }

    /// Create an account and sign it in
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Tokens of the new account's first family
    /// * `Err(DomainError::Validation)` - Bad email or password
    /// * `Err(AuthError::EmailAlreadyRegistered)` - Email taken
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let email = normalize_email(email);
        validate_credentials(&email, password)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = self.hasher.hash(password).await?;
        let user = self
            .user_repository
            .create(User::new(email, password_hash))
            .await?;

        info!(user_id = %user.id, "user registered");
        self.rotation.start_family(user.id).await
    }

    /// Sign in with email and password
    ///
    /// Unknown email and wrong password produce the same error.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Tokens of a new family replacing any earlier one
    /// * `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// * `Err(AuthError::SsoOnlyAccount)` - Account has no password
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let email = normalize_email(email);

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            debug!(email = %email, "login for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        let Some(password_hash) = user
            .password_hash
            .as_deref()
            .filter(|_| user.has_password())
        else {
            debug!(user_id = %user.id, "password login attempted on SSO account");
            return Err(AuthError::SsoOnlyAccount.into());
        };

        if !self.hasher.verify(password, password_hash).await? {
            debug!(user_id = %user.id, "login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, "user logged in");
        self.rotation.start_family(user.id).await
    }

    /// Exchange the refresh cookie for a new token pair
    ///
    /// # Returns
    ///
    /// * `Err(AuthError::MissingRefreshToken)` - No cookie was sent
    /// * `Err(AuthError::RefreshRejected)` - Expired, forged or replayed token
    pub async fn refresh(&self, refresh_token: Option<&str>) -> DomainResult<TokenPair> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;
        self.rotation.rotate(token).await
    }

    /// Revoke whatever credentials were presented
    ///
    /// Never fails; a store error on either credential is logged and that
    /// credential is reported as not revoked.
    pub async fn logout(
        &self,
        refresh_token: Option<&str>,
        access_token: Option<&str>,
    ) -> RevocationResult {
        let result = self.rotation.revoke(refresh_token, access_token).await;
        debug!(
            refresh_revoked = result.refresh_token_revoked,
            session_deleted = result.session_deleted,
            "logout"
        );
        result
    }

    /// Public profile of a user
    pub async fn get_profile(&self, user_id: Uuid) -> DomainResult<UserProfile> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .map(|user| user.profile())
            .ok_or_else(|| DomainError::NotFound {
                resource: "User".to_string(),
            })
    }
}

#[async_trait]
impl<U, S, H> AccessTokenVerifier for AuthService<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    /// Signature and expiry are not enough: the token must also still have
    /// its session record, which logout deletes.
    async fn authenticate(&self, access_token: &str) -> DomainResult<AuthContext> {
        let verified = self
            .rotation
            .tokens()
            .verify(access_token, TokenKind::Access)?;

        match self.session_repository.find_by_token(access_token).await? {
            Some(session) if session.user_id == verified.user_id => {
                Ok(AuthContext::new(verified.user_id))
            }
            _ => Err(AuthError::SessionRevoked.into()),
        }
    }
}

fn validate_credentials(email: &str, password: &str) -> DomainResult<()> {
    if !is_valid_email(email) {
        return Err(DomainError::Validation {
            message: "Please provide a valid email".to_string(),
        });
    }
    if !is_valid_password(password) {
        return Err(DomainError::Validation {
            message: format!(
                "Password must be between {} and {} characters",
                PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH
            ),
        });
    }
    Ok(())
}
