// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use runsquad::config::Config;
use runsquad::db::Db;
use runsquad::routes::create_router;
use runsquad::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

/// Create a test app backed by a fresh in-memory database.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Db::connect(&config.database_url)
        .await
        .expect("Failed to set up in-memory database");

    let state = Arc::new(AppState { config, db });
    (create_router(state.clone()), state)
}

/// Send a request and return status plus parsed JSON body (Null when the
/// body is empty or not JSON).
#[allow(dead_code)]
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Register a user and return their bearer token and ID.
#[allow(dead_code)]
pub async fn register_user(app: &Router, email: &str, name: &str) -> (String, i64) {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": "password123",
            "name": name,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    let token = body["access_token"].as_str().unwrap().to_string();
    let user_id = body["user"]["id"].as_i64().unwrap();
    (token, user_id)
}

/// Create a club and return its ID.
#[allow(dead_code)]
pub async fn create_club(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/clubs",
        Some(token),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create club failed: {body}");
    body["id"].as_i64().unwrap()
}

/// Log a run for the user behind the token.
#[allow(dead_code)]
pub async fn track_run(app: &Router, token: &str, distance_km: f64, duration_minutes: f64) {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/runs/track",
        Some(token),
        Some(json!({
            "distance_km": distance_km,
            "duration_minutes": duration_minutes,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "track run failed: {body}");
}
