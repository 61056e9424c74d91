//! Mapping from domain errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::{debug, error, warn};

use parley_core::errors::{AuthError, DomainError, TokenError};
use parley_shared::{ApiResponse, Environment};

/// Message returned for unclassified failures outside development
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Error rendered as the standard `{ success: false, message }` body
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ApiResponse::error(&self.message))
    }
}

/// Classify a domain error into a status and client-facing message
///
/// Refresh rejections share one message whatever the cause. Unclassified
/// errors only expose their text in development.
pub fn classify(error: &DomainError, environment: Environment) -> ApiError {
    let status = match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Auth(auth) => match auth {
            AuthError::EmailAlreadyRegistered
            | AuthError::InvalidCredentials
            | AuthError::SsoOnlyAccount => StatusCode::BAD_REQUEST,
            AuthError::MissingRefreshToken | AuthError::SessionRevoked => StatusCode::UNAUTHORIZED,
            AuthError::RefreshRejected => StatusCode::FORBIDDEN,
        },
        DomainError::Token(TokenError::GenerationFailed) | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
    };

    let message = if status.is_server_error() && !environment.is_development() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        error.to_string()
    };

    ApiError::new(status, message)
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError, environment: Environment) -> HttpResponse {
    let api_error = classify(&error, environment);

    if api_error.status().is_server_error() {
        error!(code = error.code(), error = %error, "request failed");
    } else if api_error.status() == StatusCode::FORBIDDEN {
        warn!(code = error.code(), "request forbidden");
    } else {
        debug!(code = error.code(), status = api_error.status().as_u16(), "request rejected");
    }

    api_error.error_response()
}
