//! In-memory implementation of UserRepository

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RotatedToken;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::r#trait::UserRepository;

/// How long a rotation stays on record
const ROTATION_RETENTION_SECONDS: i64 = 300;

/// Upper bound on rotation records kept at once
const MAX_ROTATION_RECORDS: usize = 10_000;

/// Users plus the secondary indexes, guarded by one lock so an active-set
/// mutation and its index update are a single atomic step
#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<Uuid, User>,
    by_email: HashMap<String, Uuid>,
    by_refresh_token: HashMap<String, Uuid>,
    rotated: HashMap<String, RotatedToken>,
}

impl UserTable {
    fn record_rotation(&mut self, presented: &str, record: RotatedToken) {
        let cutoff = record.rotated_at - Duration::seconds(ROTATION_RETENTION_SECONDS);
        self.rotated.retain(|_, r| r.rotated_at > cutoff);

        if self.rotated.len() >= MAX_ROTATION_RECORDS {
            let oldest = self
                .rotated
                .iter()
                .min_by_key(|(_, r)| r.rotated_at)
                .map(|(token, _)| token.clone());
            if let Some(token) = oldest {
                self.rotated.remove(&token);
            }
        }

        self.rotated.insert(presented.to_string(), record);
    }

    fn user_mut(&mut self, user_id: Uuid) -> Result<&mut User, DomainError> {
        self.users.get_mut(&user_id).ok_or_else(|| DomainError::NotFound {
            resource: format!("user {}", user_id),
        })
    }
}

/// User store backed by a `HashMap` with a reverse token index
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.by_email.contains_key(&user.email) {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        table.by_email.insert(user.email.clone(), user.id);
        for token in &user.refresh_tokens {
            table.by_refresh_token.insert(token.clone(), user.id);
        }
        table.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .by_refresh_token
            .get(token)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn replace_refresh_tokens(&self, user_id: Uuid, tokens: Vec<String>) -> Result<(), DomainError> {
        let mut table = self.table.write().await;

        let user = table.user_mut(user_id)?;
        let previous = std::mem::take(&mut user.refresh_tokens);
        user.refresh_tokens = tokens.iter().cloned().collect();
        user.updated_at = Utc::now();

        for token in previous {
            table.by_refresh_token.remove(&token);
        }
        for token in tokens {
            table.by_refresh_token.insert(token, user_id);
        }
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        user_id: Uuid,
        presented: &str,
        replacement: String,
    ) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;

        let user = table.user_mut(user_id)?;
        if !user.refresh_tokens.remove(presented) {
            return Ok(false);
        }
        let now = Utc::now();
        user.refresh_tokens.insert(replacement.clone());
        user.updated_at = now;

        table.by_refresh_token.remove(presented);
        table.by_refresh_token.insert(replacement.clone(), user_id);
        table.record_rotation(
            presented,
            RotatedToken {
                user_id,
                successor: replacement,
                rotated_at: now,
            },
        );
        Ok(true)
    }

    async fn find_rotated(&self, token: &str) -> Result<Option<RotatedToken>, DomainError> {
        let table = self.table.read().await;
        let cutoff = Utc::now() - Duration::seconds(ROTATION_RETENTION_SECONDS);
        Ok(table
            .rotated
            .get(token)
            .filter(|record| record.rotated_at > cutoff)
            .cloned())
    }

    async fn remove_refresh_token(&self, user_id: Uuid, token: &str) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;

        let Some(user) = table.users.get_mut(&user_id) else {
            return Ok(false);
        };
        if !user.refresh_tokens.remove(token) {
            return Ok(false);
        }
        user.updated_at = Utc::now();
        table.by_refresh_token.remove(token);
        Ok(true)
    }

    async fn clear_refresh_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut table = self.table.write().await;

        let Some(user) = table.users.get_mut(&user_id) else {
            return Ok(0);
        };
        let revoked = std::mem::take(&mut user.refresh_tokens);
        user.updated_at = Utc::now();

        let count = revoked.len();
        for token in revoked {
            table.by_refresh_token.remove(&token);
        }
        Ok(count)
    }
}
