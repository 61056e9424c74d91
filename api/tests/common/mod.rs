//! Shared setup for the HTTP integration tests

#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::web;
use chrono::Duration;
use std::sync::Arc;

use parley_api::AppState;
use parley_core::repositories::{InMemorySessionRepository, InMemoryUserRepository};
use parley_core::services::{AuthService, BcryptPasswordHasher, TokenService, TokenServiceConfig};
use parley_shared::{CookieConfig, Environment};

pub type TestState =
    AppState<InMemoryUserRepository, InMemorySessionRepository, BcryptPasswordHasher>;

pub struct TestApp {
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub tokens: Arc<TokenService>,
    pub state: web::Data<TestState>,
}

/// Fresh stores and a low-cost hasher
pub fn test_app() -> TestApp {
    test_app_in(Environment::Development)
}

pub fn test_app_in(environment: Environment) -> TestApp {
    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());
    // No reuse grace, so a replayed cookie revokes the family immediately.
    let tokens = Arc::new(TokenService::new(TokenServiceConfig {
        refresh_reuse_grace: Duration::zero(),
        ..TokenServiceConfig::default()
    }));
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        sessions.clone(),
        tokens.clone(),
        Arc::new(BcryptPasswordHasher::new(4)),
    ));

    let state = web::Data::new(AppState::new(
        auth_service,
        CookieConfig::for_environment(environment),
        environment,
    ));

    TestApp {
        users,
        sessions,
        tokens,
        state,
    }
}

/// The `jwt` cookie set by a response, if any
pub fn refresh_cookie_of<B: MessageBody>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == "jwt")
        .map(|cookie| cookie.into_owned())
}

pub fn credentials(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password })
}
