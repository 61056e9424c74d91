use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use parley_core::domain::entities::user::UserProfile;

/// Body of `POST /api/auth/register` and `POST /api/auth/login`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be between 6 and 128 characters"
    ))]
    pub password: String,
}

impl CredentialsRequest {
    /// First failing rule's message, or `None` when the body is valid
    pub fn validation_message(&self) -> Option<String> {
        self.validate().err().map(|errors| first_message(&errors))
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .min_by_key(|(field, _)| field_order(field))
        .and_then(|(_, errs)| errs.first())
        .and_then(|err| err.message.as_ref())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| "Validation error".to_string())
}

// Report email problems before password problems.
fn field_order(field: &str) -> u8 {
    match field {
        "email" => 0,
        "password" => 1,
        _ => 2,
    }
}

/// Access token returned in the response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub access_token: String,
}

/// Body of a successful profile lookup
#[derive(Debug, Clone, Serialize)]
pub struct ProfilePayload {
    pub user: UserProfile,
}
