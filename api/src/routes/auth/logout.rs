use actix_web::{web, HttpRequest, HttpResponse};

use parley_core::repositories::{SessionRepository, UserRepository};
use parley_core::services::auth::PasswordHasher;
use parley_shared::ApiResponse;

use crate::app::AppState;
use crate::handlers::cookies::{read_refresh_cookie, removal_cookie};
use crate::middleware::auth::bearer_from_request;

/// Handler for POST /api/auth/logout
///
/// Revokes the refresh token from the `jwt` cookie and the session of the
/// bearer access token, whichever are present. Always answers 200.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "Logged out successfully" }
/// ```
pub async fn logout<U, S, H>(req: HttpRequest, state: web::Data<AppState<U, S, H>>) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
    H: PasswordHasher + 'static,
{
    let refresh_token = read_refresh_cookie(&req, &state.cookie);
    let access_token = bearer_from_request(&req);

    state
        .auth_service
        .logout(refresh_token.as_deref(), access_token.as_deref())
        .await;

    let mut response = HttpResponse::Ok();
    if refresh_token.is_some() {
        response.cookie(removal_cookie(&state.cookie));
    }
    response.json(ApiResponse::ok("Logged out successfully"))
}
