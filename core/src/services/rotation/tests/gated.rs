//! User repository decorator that holds refresh lookups at a barrier

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Barrier;
use uuid::Uuid;

use crate::domain::entities::token::RotatedToken;
use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::{InMemoryUserRepository, UserRepository};

/// Every `find_by_refresh_token` waits until `parties` callers have
/// completed their lookup, so all of them reach the swap with the same view.
pub struct GatedUserRepository {
    pub inner: InMemoryUserRepository,
    barrier: Arc<Barrier>,
}

impl GatedUserRepository {
    pub fn new(inner: InMemoryUserRepository, parties: usize) -> Self {
        Self {
            inner,
            barrier: Arc::new(Barrier::new(parties)),
        }
    }
}

#[async_trait]
impl UserRepository for GatedUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.inner.create(user).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let found = self.inner.find_by_refresh_token(token).await;
        self.barrier.wait().await;
        found
    }

    async fn replace_refresh_tokens(&self, user_id: Uuid, tokens: Vec<String>) -> Result<(), DomainError> {
        self.inner.replace_refresh_tokens(user_id, tokens).await
    }

    async fn rotate_refresh_token(
        &self,
        user_id: Uuid,
        presented: &str,
        replacement: String,
    ) -> Result<bool, DomainError> {
        self.inner
            .rotate_refresh_token(user_id, presented, replacement)
            .await
    }

    async fn find_rotated(&self, token: &str) -> Result<Option<RotatedToken>, DomainError> {
        self.inner.find_rotated(token).await
    }

    async fn remove_refresh_token(&self, user_id: Uuid, token: &str) -> Result<bool, DomainError> {
        self.inner.remove_refresh_token(user_id, token).await
    }

    async fn clear_refresh_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.inner.clear_refresh_tokens(user_id).await
    }
}
