// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login, and token enforcement.

mod common;

use axum::http::{Method, StatusCode};
use common::{create_test_app, register_user, request};
use serde_json::json;

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let (app, _) = create_test_app().await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "ada@example.com",
            "password": "password123",
            "name": "Ada",
            "address": "1 Engine St",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["access_token"].as_str().unwrap().contains('.'));
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["name"], "Ada");
    assert_eq!(body["user"]["address"], "1 Engine St");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let (app, _) = create_test_app().await;
    register_user(&app, "ada@example.com", "Ada").await;

    let (status, _) = request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "ada@example.com",
            "password": "other",
            "name": "Someone Else",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_missing_fields_rejected() {
    let (app, _) = create_test_app().await;

    let (status, _) = request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_and_me() {
    let (app, _) = create_test_app().await;
    register_user(&app, "ada@example.com", "Ada").await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({
            "email": "ada@example.com",
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = request(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ada@example.com");
}

#[tokio::test]
async fn test_login_wrong_password_is_401() {
    let (app, _) = create_test_app().await;
    register_user(&app, "ada@example.com", "Ada").await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({
            "email": "ada@example.com",
            "password": "wrong",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let (app, _) = create_test_app().await;

    let (status, body) = request(&app, Method::GET, "/api/clubs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authorization token is missing");
}

#[tokio::test]
async fn test_garbage_token_is_422() {
    let (app, _) = create_test_app().await;

    let (status, _) = request(
        &app,
        Method::GET,
        "/api/clubs",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_expired_token_is_401() {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        iat: usize,
    }

    let (app, state) = create_test_app().await;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;
    let claims = Claims {
        sub: "1".to_string(),
        exp: now - 3600,
        iat: now - 7200,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&state.config.jwt_secret),
    )
    .unwrap();

    let (status, _) = request(&app, Method::GET, "/api/clubs", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _) = create_test_app().await;

    for uri in ["/", "/health", "/api", "/api/health"] {
        let (status, body) = request(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "health check failed at {uri}");
        assert_eq!(body["status"], "ok");
    }
}
