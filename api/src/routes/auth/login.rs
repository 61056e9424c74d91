use actix_web::{web, HttpResponse, ResponseError};

use parley_core::repositories::{SessionRepository, UserRepository};
use parley_core::services::auth::PasswordHasher;
use parley_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{AuthPayload, CredentialsRequest};
use crate::handlers::cookies::refresh_cookie;
use crate::handlers::error::{handle_domain_error, ApiError};

/// Handler for POST /api/auth/login
///
/// Starts a new refresh-token family; refresh tokens from earlier logins
/// stop working.
///
/// ## Errors
/// - 400 Bad Request: Invalid input, invalid credentials, or SSO-only account
pub async fn login<U, S, H>(
    state: web::Data<AppState<U, S, H>>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Some(message) = request.validation_message() {
        return ApiError::bad_request(message).error_response();
    }

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(pair) => HttpResponse::Ok()
            .cookie(refresh_cookie(&state.cookie, &pair.refresh_token))
            .json(
                ApiResponse::success(AuthPayload {
                    access_token: pair.access_token,
                })
                .with_message("Login successful"),
            ),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
