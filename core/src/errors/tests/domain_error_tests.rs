//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, TokenError};

#[test]
fn test_credential_errors_share_one_message() {
    // Unknown email and wrong password surface the same variant.
    assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    assert_ne!(
        AuthError::SsoOnlyAccount.to_string(),
        AuthError::InvalidCredentials.to_string()
    );
    assert!(AuthError::SsoOnlyAccount.to_string().contains("SSO"));
}

#[test]
fn test_domain_error_bridges() {
    let err: DomainError = AuthError::RefreshRejected.into();
    assert_eq!(err.code(), "REFRESH_REJECTED");
    assert_eq!(err.to_string(), "Forbidden, refresh token rejected");

    let err: DomainError = TokenError::Expired.into();
    assert_eq!(err.code(), "TOKEN_EXPIRED");
}

#[test]
fn test_validation_message_is_verbatim() {
    let err = DomainError::Validation {
        message: "Please provide a valid email".to_string(),
    };
    assert_eq!(err.to_string(), "Please provide a valid email");
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[test]
fn test_expiry_is_distinguished_from_tampering() {
    assert!(TokenError::Expired.is_expiry());
    assert!(!TokenError::InvalidSignature.is_expiry());
    assert!(!TokenError::Malformed.is_expiry());
}

#[test]
fn test_not_found_names_the_resource() {
    let err = DomainError::NotFound {
        resource: "User".to_string(),
    };
    assert_eq!(err.to_string(), "User not found");
}
