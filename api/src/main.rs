use actix_web::{web, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};

use parley_api::{create_app, telemetry, AppState};
use parley_core::repositories::{InMemorySessionRepository, InMemoryUserRepository};
use parley_core::services::{
    AuthService, BcryptPasswordHasher, SessionCleanupConfig, SessionCleanupService, TokenService,
    TokenServiceConfig,
};
use parley_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        bind = %config.server.bind_address(),
        frontend_url = config.server.frontend_url.as_deref().unwrap_or("<unset>"),
        "Starting Parley API server"
    );
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET or JWT_REFRESH_SECRET not set, using development defaults");
    }

    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
    let hasher = Arc::new(BcryptPasswordHasher::from(&config.auth.password));
    let auth_service = Arc::new(AuthService::new(users, sessions.clone(), tokens, hasher));

    Arc::new(SessionCleanupService::new(
        sessions,
        SessionCleanupConfig::from(&config.session_store),
    ))
    .start_background_task();

    let state = web::Data::new(AppState::new(
        auth_service,
        config.auth.cookie.clone(),
        config.environment,
    ));

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(config.server.bind_address())?.run().await?;

    info!("Parley API server stopped");
    Ok(())
}
