//! Mock implementations for testing authentication service

use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

use crate::errors::DomainResult;
use crate::repositories::{InMemorySessionRepository, InMemoryUserRepository};
use crate::services::auth::{AuthService, PasswordHasher};
use crate::services::token::{TokenService, TokenServiceConfig};

/// Reversible stand-in for bcrypt so tests stay fast
pub struct PlainTextHasher;

const PREFIX: &str = "plain:";

#[async_trait]
impl PasswordHasher for PlainTextHasher {
    async fn hash(&self, password: &str) -> DomainResult<String> {
        Ok(format!("{}{}", PREFIX, password))
    }

    async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        Ok(hash.strip_prefix(PREFIX) == Some(password))
    }
}

pub type TestAuthService =
    AuthService<InMemoryUserRepository, InMemorySessionRepository, PlainTextHasher>;

pub struct TestContext {
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub service: TestAuthService,
}

pub fn context() -> TestContext {
    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());
    let service = AuthService::new(
        users.clone(),
        sessions.clone(),
        // No reuse grace: any replay after a committed rotation is theft.
        Arc::new(TokenService::new(TokenServiceConfig {
            refresh_reuse_grace: Duration::zero(),
            ..TokenServiceConfig::default()
        })),
        Arc::new(PlainTextHasher),
    );

    TestContext {
        users,
        sessions,
        service,
    }
}
