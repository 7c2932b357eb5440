// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live run sessions and location sharing.

mod common;

use axum::http::{Method, StatusCode};
use common::{create_club, create_test_app, register_user, request};
use serde_json::json;

#[tokio::test]
async fn test_live_run_lifecycle() {
    let (app, _) = create_test_app().await;
    let (token, _) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/runs/live/start",
        Some(&token),
        Some(json!({ "club_id": club_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["session"]["status"], "active");
    let session_id = body["session"]["id"].as_i64().unwrap();

    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/runs/live/{session_id}/location"),
        Some(&token),
        Some(json!({ "latitude": 37.4, "longitude": -122.2, "speed": 3.1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        &app,
        Method::GET,
        &format!("/api/runs/live/active/{club_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let sessions = body.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["latest_location"]["latitude"], 37.4);
    assert_eq!(sessions[0]["user"]["name"], "Ada");

    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/runs/live/{session_id}/stop"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A stopped session drops off the club view and rejects locations.
    let (_, body) = request(
        &app,
        Method::GET,
        &format!("/api/runs/live/active/{club_id}"),
        Some(&token),
        None,
    )
    .await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/runs/live/{session_id}/location"),
        Some(&token),
        Some(json!({ "latitude": 37.4, "longitude": -122.2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_the_runner_controls_a_session() {
    let (app, _) = create_test_app().await;
    let (ada, _) = register_user(&app, "ada@example.com", "Ada").await;
    let (grace, _) = register_user(&app, "grace@example.com", "Grace").await;

    let (_, body) = request(
        &app,
        Method::POST,
        "/api/runs/live/start",
        Some(&ada),
        Some(json!({})),
    )
    .await;
    let session_id = body["session"]["id"].as_i64().unwrap();

    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/runs/live/{session_id}/location"),
        Some(&grace),
        Some(json!({ "latitude": 0.0, "longitude": 0.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/runs/live/{session_id}/stop"),
        Some(&grace),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cannot_share_with_a_club_you_are_not_in() {
    let (app, _) = create_test_app().await;
    let (ada, _) = register_user(&app, "ada@example.com", "Ada").await;
    let (grace, _) = register_user(&app, "grace@example.com", "Grace").await;
    let club_id = create_club(&app, &ada, "Morning Milers").await;

    let (status, _) = request(
        &app,
        Method::POST,
        "/api/runs/live/start",
        Some(&grace),
        Some(json!({ "club_id": club_id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
