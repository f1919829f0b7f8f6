mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{INVITE_CODE, STRONG_PASSWORD, TestApp, signup_body};
use rsvp::store::IdentityStore;
use serde_json::json;

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new();

    let response = app.signup("x@y.com", STRONG_PASSWORD).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(!response.body["token"].as_str().unwrap().is_empty());
    assert!(!response.body["refreshToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_signup_persists_issued_tokens() {
    let app = TestApp::new();
    let user = app.signed_up("x@y.com").await;

    let stored = app.store.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.access_token.as_deref(), Some(user.token.as_str()));
    assert_eq!(
        stored.refresh_token.as_deref(),
        Some(user.refresh_token.as_str())
    );
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::new();
    app.signed_up("x@y.com").await;

    let response = app.signup("X@Y.com", "Other99!!Pass").await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["error"],
        "An account with this email already exists"
    );
}

#[tokio::test]
async fn test_signup_invalid_invite_code() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            None,
            Some(signup_body("x@y.com", STRONG_PASSWORD, "guess")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid invite code");
    assert!(app.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_signup_invalid_invite_code_hides_existing_email() {
    let app = TestApp::new();
    app.signed_up("x@y.com").await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            None,
            Some(signup_body("x@y.com", STRONG_PASSWORD, "guess")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_weak_password_lists_all_rules() {
    let app = TestApp::new();

    let response = app.signup("x@y.com", "abc").await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = response.body["error"].as_str().unwrap();
    assert!(message.contains("at least 8 characters"), "{message}");
    assert!(message.contains("at least 2 digits"), "{message}");
    assert!(message.contains("at least 2 special characters"), "{message}");
    assert!(message.contains("at least 2 uppercase letters"), "{message}");
}

#[tokio::test]
async fn test_signup_weak_password_lists_only_failed_rules() {
    let app = TestApp::new();

    let response = app.signup("x@y.com", "ASdfghjk12").await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = response.body["error"].as_str().unwrap();
    assert!(message.contains("special characters"), "{message}");
    assert!(!message.contains("digits"), "{message}");
    assert!(!message.contains("uppercase"), "{message}");
    assert!(!message.contains("characters long"), "{message}");
}

#[tokio::test]
async fn test_signup_missing_field() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({
                "email": "x@y.com",
                "password": STRONG_PASSWORD,
                "firstName": "Ada",
                "inviteCode": INVITE_CODE,
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "lastName is required");
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = TestApp::new();

    let response = app.signup("not-an-email", STRONG_PASSWORD).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_without_json_body() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/auth/signup", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_signups_with_same_email() {
    let app = Arc::new(TestApp::new());

    let attempts = (0..8).map(|_| {
        let app = Arc::clone(&app);
        tokio::spawn(async move { app.signup("race@y.com", STRONG_PASSWORD).await.status })
    });

    let mut created = 0;
    for attempt in attempts {
        let status = attempt.await.unwrap();
        match status {
            StatusCode::CREATED => created += 1,
            StatusCode::UNPROCESSABLE_ENTITY => {}
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(app.store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.signed_up("x@y.com").await;

    let response = app.login("x@y.com", STRONG_PASSWORD).await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert!(!response.body["token"].as_str().unwrap().is_empty());
    assert!(!response.body["refreshToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::new();
    app.signed_up("x@y.com").await;

    let response = app.login("X@Y.COM", STRONG_PASSWORD).await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_login_overwrites_stored_tokens() {
    let app = TestApp::new();
    let user = app.signed_up("x@y.com").await;

    let response = app.login("x@y.com", STRONG_PASSWORD).await;

    let stored = app.store.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(
        stored.refresh_token.as_deref(),
        response.body["refreshToken"].as_str()
    );
    assert_ne!(stored.refresh_token.as_deref(), Some(user.refresh_token.as_str()));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.signed_up("x@y.com").await;

    let wrong_password = app.login("x@y.com", "ASdf12#%").await;
    let unknown_email = app.login("nobody@y.com", STRONG_PASSWORD).await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status, unknown_email.status);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_missing_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "x@y.com" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "password is required");
}

#[tokio::test]
async fn test_signup_then_login_then_protected_request() {
    let app = TestApp::new();
    assert_eq!(
        app.signup("x@y.com", STRONG_PASSWORD).await.status,
        StatusCode::CREATED
    );

    let login = app.login("x@y.com", STRONG_PASSWORD).await;
    assert_eq!(login.status, StatusCode::ACCEPTED);
    let token = login.body["token"].as_str().unwrap();

    let ok = app.request("GET", "/api/users/me", Some(token), None).await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["email"], "x@y.com");

    let truncated = &token[..token.len() - 1];
    let rejected = app
        .request("GET", "/api/users/me", Some(truncated), None)
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_issues_new_pair() {
    let app = TestApp::new();
    let user = app.signed_up("x@y.com").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(json!({ "refreshToken": user.refresh_token })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_token = response.body["token"].as_str().unwrap();
    let me = app.request("GET", "/api/users/me", Some(new_token), None).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_token_superseded_by_login() {
    let app = TestApp::new();
    let user = app.signed_up("x@y.com").await;
    app.login("x@y.com", STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(json!({ "refreshToken": user.refresh_token })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid or expired refresh token");
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new();
    let user = app.signed_up("x@y.com").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(json!({ "refreshToken": user.token })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_rejects_whitespace_only_names() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({
                "email": "x@y.com",
                "password": STRONG_PASSWORD,
                "firstName": "   ",
                "lastName": " ",
                "inviteCode": INVITE_CODE,
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "firstName is required, lastName is required"
    );
    assert!(app.store.find_by_email("x@y.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_signup_rejects_password_longer_than_72_bytes() {
    let app = TestApp::new();
    let password = format!("{}first", "AB12#$".repeat(12));

    let response = app.signup("x@y.com", &password).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["error"],
        "Password must be at most 72 bytes long"
    );
}

#[tokio::test]
async fn test_login_rejects_longer_password_sharing_stored_prefix() {
    let app = TestApp::new();
    let password = "AB12#$".repeat(12);
    let response = app.signup("x@y.com", &password).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.login("x@y.com", &format!("{password}DIFFERENT")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid email or password");

    let response = app.login("x@y.com", &password).await;
    assert_eq!(response.status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_signup_store_failure_is_opaque_500() {
    let app = TestApp::new();
    app.store.set_unavailable(true);

    let response = app.signup("x@y.com", STRONG_PASSWORD).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_login_store_failure_is_opaque_500() {
    let app = TestApp::new();
    app.signed_up("x@y.com").await;
    app.store.set_unavailable(true);

    let response = app.login("x@y.com", STRONG_PASSWORD).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({ "error": "Internal server error" }));
}
