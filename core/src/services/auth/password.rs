//! Password hashing

use async_trait::async_trait;
use tracing::warn;

use parley_shared::PasswordConfig;

use crate::errors::{DomainError, DomainResult};

/// One-way password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> DomainResult<String>;

    /// `Ok(false)` for a mismatch and for a hash that cannot be parsed
    async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}

/// bcrypt hasher running on the blocking thread pool
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(PasswordConfig::default().bcrypt_cost)
    }
}

impl From<&PasswordConfig> for BcryptPasswordHasher {
    fn from(config: &PasswordConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("password hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
    }

    async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("password verification task failed: {}", e)))?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(e) => {
                warn!(error = %e, "stored password hash could not be checked");
                Ok(false)
            }
        }
    }
}
