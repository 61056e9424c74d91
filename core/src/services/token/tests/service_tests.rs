//! Unit tests for token service

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::TokenKind;
use crate::errors::TokenError;
use crate::services::token::{TokenService, TokenServiceConfig};

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig::default())
}

#[test]
fn test_issue_and_verify_access() {
    let service = service();
    let user_id = Uuid::new_v4();

    let token = service.issue_access(user_id).unwrap();
    let verified = service.verify(&token, TokenKind::Access).unwrap();

    assert_eq!(verified.user_id, user_id);
    assert_eq!(verified.kind, TokenKind::Access);
    let remaining = verified.expires_at - Utc::now();
    assert!(remaining <= Duration::minutes(15));
    assert!(remaining > Duration::minutes(14));
}

#[test]
fn test_issue_and_verify_refresh() {
    let service = service();
    let user_id = Uuid::new_v4();

    let token = service.issue_refresh(user_id).unwrap();
    let verified = service.verify(&token, TokenKind::Refresh).unwrap();

    assert_eq!(verified.user_id, user_id);
    assert!(verified.expires_at - Utc::now() > Duration::days(6));
}

#[test]
fn test_same_second_tokens_differ() {
    let service = service();
    let user_id = Uuid::new_v4();

    let a = service.issue_refresh(user_id).unwrap();
    let b = service.issue_refresh(user_id).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_kinds_do_not_cross_verify() {
    let service = service();
    let user_id = Uuid::new_v4();

    let access = service.issue_access(user_id).unwrap();
    let refresh = service.issue_refresh(user_id).unwrap();

    // Different secrets, so the signature check fails first.
    assert_eq!(
        service.verify(&access, TokenKind::Refresh).unwrap_err(),
        TokenError::InvalidSignature
    );
    assert_eq!(
        service.verify(&refresh, TokenKind::Access).unwrap_err(),
        TokenError::InvalidSignature
    );
}

#[test]
fn test_kind_claim_checked_with_shared_secret() {
    let service = TokenService::new(TokenServiceConfig {
        access_secret: "same".to_string(),
        refresh_secret: "same".to_string(),
        ..TokenServiceConfig::default()
    });

    let refresh = service.issue_refresh(Uuid::new_v4()).unwrap();
    assert_eq!(
        service.verify(&refresh, TokenKind::Access).unwrap_err(),
        TokenError::WrongKind
    );
}

#[test]
fn test_expired_is_distinguished() {
    let service = service();
    let token = service
        .issue(Uuid::new_v4(), TokenKind::Refresh, Duration::seconds(-60))
        .unwrap();

    let err = service.verify(&token, TokenKind::Refresh).unwrap_err();
    assert_eq!(err, TokenError::Expired);
    assert!(err.is_expiry());
}

#[test]
fn test_foreign_secret_rejected() {
    let other = TokenService::new(TokenServiceConfig {
        refresh_secret: "someone-else".to_string(),
        ..TokenServiceConfig::default()
    });
    let token = other.issue_refresh(Uuid::new_v4()).unwrap();

    assert_eq!(
        service().verify(&token, TokenKind::Refresh).unwrap_err(),
        TokenError::InvalidSignature
    );
}

#[test]
fn test_garbage_is_malformed() {
    let service = service();
    assert_eq!(
        service.verify("not-a-jwt", TokenKind::Access).unwrap_err(),
        TokenError::Malformed
    );
    assert_eq!(service.verify("", TokenKind::Refresh).unwrap_err(), TokenError::Malformed);
}

#[test]
fn test_decode_unsafe_reads_expired_and_foreign_tokens() {
    let service = service();
    let user_id = Uuid::new_v4();

    let expired = service
        .issue(user_id, TokenKind::Access, Duration::seconds(-60))
        .unwrap();
    let claims = service.decode_unsafe(&expired).unwrap();
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert!(claims.is_expired());

    let foreign = TokenService::new(TokenServiceConfig {
        access_secret: "elsewhere".to_string(),
        ..TokenServiceConfig::default()
    })
    .issue_access(user_id)
    .unwrap();
    assert!(service.decode_unsafe(&foreign).is_some());

    assert!(service.decode_unsafe("garbage").is_none());
}
