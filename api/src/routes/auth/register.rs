use actix_web::{web, HttpResponse, ResponseError};

use parley_core::repositories::{SessionRepository, UserRepository};
use parley_core::services::auth::PasswordHasher;
use parley_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{AuthPayload, CredentialsRequest};
use crate::handlers::cookies::refresh_cookie;
use crate::handlers::error::{handle_domain_error, ApiError};

/// Handler for POST /api/auth/register
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "password": "secret1" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// Sets the `jwt` refresh cookie.
/// ```json
/// { "success": true, "message": "User registered successfully", "accessToken": "eyJ..." }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid input or email already registered
pub async fn register<U, S, H>(
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

    match state
        .auth_service
        .register(&request.email, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Created()
            .cookie(refresh_cookie(&state.cookie, &pair.refresh_token))
            .json(
                ApiResponse::success(AuthPayload {
                    access_token: pair.access_token,
                })
                .with_message("User registered successfully"),
            ),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
