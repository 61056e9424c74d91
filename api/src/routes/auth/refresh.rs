use actix_web::{web, HttpRequest, HttpResponse};
use tracing::warn;

use parley_core::errors::AuthError;
use parley_core::repositories::{SessionRepository, UserRepository};
use parley_core::services::auth::PasswordHasher;
use parley_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::AuthPayload;
use crate::handlers::cookies::{read_refresh_cookie, refresh_cookie, removal_cookie};
use crate::handlers::error::handle_domain_error;

/// Handler for POST /api/auth/refresh
///
/// Exchanges the `jwt` cookie for a new access token and a new cookie. The
/// presented cookie is always cleared, so a rejected refresh leaves the
/// client signed out.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "accessToken": "eyJ..." }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: No refresh cookie
/// - 403 Forbidden: Refresh token expired, invalid or reused
pub async fn refresh<U, S, H>(req: HttpRequest, state: web::Data<AppState<U, S, H>>) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
    H: PasswordHasher + 'static,
{
    let Some(presented) = read_refresh_cookie(&req, &state.cookie) else {
        return handle_domain_error(AuthError::MissingRefreshToken.into(), state.environment);
    };

    match state.auth_service.refresh(Some(&presented)).await {
        Ok(pair) => HttpResponse::Ok()
            .cookie(refresh_cookie(&state.cookie, &pair.refresh_token))
            .json(ApiResponse::success(AuthPayload {
                access_token: pair.access_token,
            })),
        Err(error) => {
            let mut response = handle_domain_error(error, state.environment);
            if let Err(e) = response.add_cookie(&removal_cookie(&state.cookie)) {
                warn!(error = %e, "could not clear refresh cookie");
            }
            response
        }
    }
}
