//! Tests for admin sessions and the mutation guard.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use super::auth::{DEFAULT_ADMIN_PASSWORD, SessionRegistry};
use super::test_support::{
    TEST_PASSWORD, TestApp, empty_request, get, json_request, raw_json_request,
};

#[test]
fn test_login_with_correct_password_issues_token() {
    let registry = SessionRegistry::new("pw", Duration::from_secs(60));

    let token = registry.login("pw").expect("login should succeed");

    assert_eq!(token.len(), 64);
    assert!(registry.validate(&token));
}

#[test]
fn test_login_with_wrong_password_is_rejected() {
    let registry = SessionRegistry::new("pw", Duration::from_secs(60));

    assert!(registry.login("wrong").is_none());
    assert!(registry.login("").is_none());
}

#[test]
fn test_tokens_are_unique_per_login() {
    let registry = SessionRegistry::new("pw", Duration::from_secs(60));

    let a = registry.login("pw").unwrap();
    let b = registry.login("pw").unwrap();

    assert_ne!(a, b);
    assert!(registry.validate(&a));
    assert!(registry.validate(&b));
}

#[test]
fn test_expired_session_is_invalid() {
    let registry = SessionRegistry::new("pw", Duration::ZERO);

    let token = registry.login("pw").unwrap();

    assert!(!registry.validate(&token));
}

#[test]
fn test_logout_ends_session() {
    let registry = SessionRegistry::new("pw", Duration::from_secs(60));
    let token = registry.login("pw").unwrap();

    assert!(registry.logout(&token));
    assert!(!registry.validate(&token));
    assert!(!registry.logout(&token));
}

#[test]
fn test_default_password_detection() {
    assert!(
        SessionRegistry::new(DEFAULT_ADMIN_PASSWORD, Duration::from_secs(1)).uses_default_password()
    );
    assert!(!SessionRegistry::new("other", Duration::from_secs(1)).uses_default_password());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_endpoint_returns_token() {
    let app = TestApp::file().await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "password": TEST_PASSWORD }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_endpoint_rejects_wrong_password() {
    let app = TestApp::file().await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "password": "wrong" }),
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid password");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reads_do_not_need_a_session() {
    let app = TestApp::file().await;

    let (status, _) = app.send(get("/api/projects")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send(get("/api/v1/techstack")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mutation_without_token_is_unauthorized() {
    let app = TestApp::file().await;
    let record = json!({ "title": "Foo", "description": "d" });

    let (status, body) = app
        .send(json_request("POST", "/api/projects", None, record.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication required");

    let (status, _) = app
        .send(json_request("POST", "/api/v1/projects", None, record))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(empty_request("POST", "/api/v1/resume/upload-url", None))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Nothing was written
    let (_, list) = app.send(get("/api/projects")).await;
    assert_eq!(list, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mutation_with_unknown_token_is_unauthorized() {
    let app = TestApp::file().await;

    let (status, body) = app
        .send(json_request(
            "DELETE",
            "/api/blogs?title=Foo",
            Some("not-a-token"),
            json!({}),
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Session expired, please log in again");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_revokes_token() {
    let app = TestApp::file().await;
    let token = app.token().await;

    let (status, _) = app
        .send(empty_request("POST", "/api/auth/logout", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/techstack",
            Some(&token),
            json!({ "name": "Rust", "category": "Languages" }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_with_malformed_body_gets_error_body() {
    let app = TestApp::file().await;

    let (status, body) = app
        .send(raw_json_request("POST", "/api/auth/login", None, "{\"password\":"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(body.get("token").is_none());
}
