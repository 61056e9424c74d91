use actix_web::{web, HttpResponse};

use parley_core::repositories::{SessionRepository, UserRepository};
use parley_core::services::auth::PasswordHasher;
use parley_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::ProfilePayload;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::Authenticated;

/// Handler for GET /api/auth/profile
///
/// Requires `Authorization: Bearer <access token>`.
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid or logged-out access token
/// - 404 Not Found: The user no longer exists
pub async fn profile<U, S, H>(
    state: web::Data<AppState<U, S, H>>,
    auth: Authenticated,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
    H: PasswordHasher + 'static,
{
    match state.auth_service.get_profile(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(ProfilePayload { user })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
