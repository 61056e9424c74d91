//! Application state and factory
//!
//! Builds the actix-web `App` around an `AuthService` so the binary and the
//! integration tests serve exactly the same routes.

use actix_web::{web, App, HttpResponse};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use parley_core::repositories::{SessionRepository, UserRepository};
use parley_core::services::auth::{AccessTokenVerifier, AuthService, PasswordHasher};
use parley_shared::{ApiResponse, CookieConfig, Environment, HealthResponse};

use crate::handlers::error::ApiError;
use crate::middleware::auth::{JwtAuth, VerifierData};
use crate::routes::auth::{login, logout, profile, refresh, register};

/// Application state that holds shared services
pub struct AppState<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, S, H>>,
    pub cookie: CookieConfig,
    pub environment: Environment,
}

impl<U, S, H> AppState<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    pub fn new(
        auth_service: Arc<AuthService<U, S, H>>,
        cookie: CookieConfig,
        environment: Environment,
    ) -> Self {
        Self {
            auth_service,
            cookie,
            environment,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, S, H>(
    app_state: web::Data<AppState<U, S, H>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
    H: PasswordHasher + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = app_state.auth_service.clone();

    App::new()
        .app_data(app_state)
        .app_data(VerifierData::new(verifier))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            ApiError::bad_request(err.to_string()).into()
        }))
        .wrap(TracingLogger::default())
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health_check))
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::register::<U, S, H>))
                        .route("/login", web::post().to(login::login::<U, S, H>))
                        .route("/refresh", web::post().to(refresh::refresh::<U, S, H>))
                        .route("/logout", web::post().to(logout::logout::<U, S, H>))
                        .service(
                            web::resource("/profile")
                                .wrap(JwtAuth::new())
                                .route(web::get().to(profile::profile::<U, S, H>)),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "parley-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error("The requested resource was not found"))
}
