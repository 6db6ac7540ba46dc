//! Integration tests for registration, login, and bearer authentication.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_returns_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "Ana@Example.com",
                "password": PASSWORD,
                "fullName": "Ana Lima",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["email"], "ana@example.com");
    assert_eq!(response.data()["fullName"], "Ana Lima");
    assert!(response.data()["token"].as_str().is_some());
    assert!(response.data()["expiresAt"].as_str().is_some());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.register("ana@example.com", "Ana").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "ANA@example.com",
                "password": PASSWORD,
                "fullName": "Other Ana",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "ana@example.com",
                "password": "password",
                "fullName": "Ana",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "not-an-email",
                "password": PASSWORD,
                "fullName": "Ana",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ana@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.register("ana@example.com", "Ana").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ana@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["token"].as_str().is_some());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_alike() {
    let app = TestApp::new();
    app.register("ana@example.com", "Ana").await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ana@example.com", "password": "nope-nope-nope" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["message"], "Invalid email or password");
    assert_eq!(wrong.body["message"], unknown.body["message"]);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/users/me", None, None).await;
    let garbage = app
        .request("GET", "/api/users/me", None, Some("not.a.jwt"))
        .await;

    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_roundtrip() {
    let app = TestApp::new();
    let token = app.register("ana@example.com", "Ana").await;

    let me = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["email"], "ana@example.com");
    assert!(me.data().get("passwordHash").is_none());

    let updated = app
        .request(
            "PUT",
            "/api/users/me",
            Some(json!({ "fullName": "Ana Lima", "avatarUrl": "https://img.example.com/a.png" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["fullName"], "Ana Lima");
    assert_eq!(
        updated.data()["customAvatarUrl"],
        "https://img.example.com/a.png"
    );

    let cleared = app
        .request(
            "PUT",
            "/api/users/me",
            Some(json!({ "avatarUrl": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.data()["customAvatarUrl"].is_null());
    assert_eq!(cleared.data()["fullName"], "Ana Lima");
}
