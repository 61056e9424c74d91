//! Integration tests for the register and login endpoints

mod common;

use actix_web::cookie::{time::Duration, SameSite};
use actix_web::{http::StatusCode, test};
use parley_api::create_app;
use parley_core::domain::entities::user::User;
use parley_core::repositories::UserRepository;
use parley_shared::Environment;

use common::{credentials, refresh_cookie_of, test_app, test_app_in};

#[actix_web::test]
async fn test_register_creates_account_and_sets_cookie() {
    let ctx = test_app();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(credentials("Alice@Example.com", "secret1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let cookie = refresh_cookie_of(&resp).expect("refresh cookie");
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(Duration::seconds(604800)));
    assert_ne!(cookie.secure(), Some(true));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert!(body["accessToken"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body.get("refreshToken").is_none());

    let user = ctx
        .users
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .expect("stored under the normalized email");
    assert_eq!(user.name, "alice");
    assert!(user.owns_refresh_token(cookie.value()));
    assert_ne!(user.password_hash.as_deref(), Some("secret1"));
}

#[actix_web::test]
async fn test_production_cookie_is_secure() {
    let ctx = test_app_in(Environment::Production);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(credentials("prod@example.com", "secret1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let cookie = refresh_cookie_of(&resp).expect("refresh cookie");
    assert_eq!(cookie.secure(), Some(true));
}

#[actix_web::test]
async fn test_register_duplicate_email() {
    let ctx = test_app();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(credentials("dup@example.com", "secret1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);

        if expected == StatusCode::BAD_REQUEST {
            assert!(refresh_cookie_of(&resp).is_none());
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "Email already registered");
        }
    }
}

#[actix_web::test]
async fn test_register_rejects_invalid_input() {
    let ctx = test_app();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let cases = [
        (credentials("not-an-email", "secret1"), "Please provide a valid email"),
        (
            credentials("short@example.com", "12345"),
            "Password must be between 6 and 128 characters",
        ),
    ];

    for (payload, message) in cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], message);
    }

    assert!(ctx.users.is_empty().await);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = test_app();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_login_success_replaces_active_set() {
    let ctx = test_app();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(credentials("bob@example.com", "secret1"))
        .to_request();
    let registered = refresh_cookie_of(&test::call_service(&app, req).await).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(credentials("  BOB@example.com ", "secret1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = refresh_cookie_of(&resp).expect("refresh cookie");
    assert_ne!(cookie.value(), registered.value());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Login successful");
    assert!(body["accessToken"].is_string());

    let user = ctx.users.find_by_email("bob@example.com").await.unwrap().unwrap();
    let active = ctx.users.active_refresh_tokens(user.id).await.unwrap();
    assert_eq!(active, vec![cookie.value().to_string()]);
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = test_app();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(credentials("carol@example.com", "secret1"))
        .to_request();
    test::call_service(&app, req).await;

    let mut bodies = Vec::new();
    for payload in [
        credentials("carol@example.com", "wrong-password"),
        credentials("nobody@example.com", "secret1"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(refresh_cookie_of(&resp).is_none());
        let body: serde_json::Value = test::read_body_json(resp).await;
        bodies.push(body);
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0]["message"], "Invalid credentials");
}

#[actix_web::test]
async fn test_login_to_external_account() {
    let ctx = test_app();
    ctx.users
        .create(User::new_external("sso@example.com".to_string()))
        .await
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(credentials("sso@example.com", "anything"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "This account was registered via SSO. Please sign in with Google or GitHub."
    );
}
