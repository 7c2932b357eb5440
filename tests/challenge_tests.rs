// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge lifecycle: creation, participation, progress, leaderboards,
//! and badges.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use chrono::{Duration, SecondsFormat, Utc};
use common::{create_club, create_test_app, register_user, request, track_run};
use serde_json::{json, Value};

/// Create a challenge that started yesterday and runs for 30 more days.
async fn create_active_challenge(
    app: &Router,
    token: &str,
    club_id: i64,
    challenge_type: &str,
    goal_value: f64,
) -> i64 {
    let start = (Utc::now() - Duration::days(1)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let end = (Utc::now() + Duration::days(30)).to_rfc3339_opts(SecondsFormat::Secs, true);

    let (status, body) = request(
        app,
        Method::POST,
        &format!("/api/challenges/club/{club_id}"),
        Some(token),
        Some(json!({
            "title": "Club challenge",
            "challenge_type": challenge_type,
            "goal_value": goal_value,
            "start_date": start,
            "end_date": end,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create challenge failed: {body}");
    body["challenge"]["id"].as_i64().unwrap()
}

async fn join(app: &Router, token: &str, challenge_id: i64) -> (StatusCode, Value) {
    request(
        app,
        Method::POST,
        &format!("/api/challenges/{challenge_id}/join"),
        Some(token),
        None,
    )
    .await
}

async fn leaderboard(app: &Router, token: &str, challenge_id: i64) -> Value {
    let (status, body) = request(
        app,
        Method::GET,
        &format!("/api/challenges/{challenge_id}/leaderboard"),
        Some(token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "leaderboard failed: {body}");
    body["leaderboard"].clone()
}

#[tokio::test]
async fn test_total_distance_challenge_end_to_end() {
    let (app, _) = create_test_app().await;
    let (token, _) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;
    let challenge_id =
        create_active_challenge(&app, &token, club_id, "total_distance", 10.0).await;

    let (status, _) = join(&app, &token, challenge_id).await;
    assert_eq!(status, StatusCode::CREATED);

    // Tracking runs updates challenge progress automatically.
    track_run(&app, &token, 6.0, 30.0).await;

    let (_, body) = request(
        &app,
        Method::GET,
        &format!("/api/challenges/club/{club_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body[0]["user_progress"], 6.0);
    assert_eq!(body[0]["is_participating"], true);
    assert_eq!(body[0]["participant_count"], 1);

    track_run(&app, &token, 5.0, 25.0).await;

    let entries = leaderboard(&app, &token, challenge_id).await;
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["progress_value"], 11.0);
    assert_eq!(entries[0]["progress_percentage"], 110.0);
    assert_eq!(entries[0]["is_current_user"], true);
}

#[tokio::test]
async fn test_join_seeds_progress_from_existing_runs() {
    let (app, _) = create_test_app().await;
    let (token, _) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;
    let challenge_id =
        create_active_challenge(&app, &token, club_id, "total_distance", 10.0).await;

    // Run logged before joining still counts, its date is in the window.
    track_run(&app, &token, 4.0, 20.0).await;

    let (status, body) = join(&app, &token, challenge_id).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["participant"]["progress_value"], 4.0);
}

#[tokio::test]
async fn test_duplicate_join_rejected() {
    let (app, _) = create_test_app().await;
    let (token, _) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;
    let challenge_id =
        create_active_challenge(&app, &token, club_id, "total_distance", 10.0).await;

    let (status, _) = join(&app, &token, challenge_id).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = join(&app, &token, challenge_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_join_requires_club_membership() {
    let (app, _) = create_test_app().await;
    let (ada, _) = register_user(&app, "ada@example.com", "Ada").await;
    let (grace, _) = register_user(&app, "grace@example.com", "Grace").await;
    let club_id = create_club(&app, &ada, "Morning Milers").await;
    let challenge_id = create_active_challenge(&app, &ada, club_id, "total_distance", 10.0).await;

    let (status, _) = join(&app, &grace, challenge_id).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_fastest_5k_manual_tracking_only_improves() {
    let (app, _) = create_test_app().await;
    let (token, _) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;
    let challenge_id = create_active_challenge(&app, &token, club_id, "fastest_5k", 25.0).await;
    join(&app, &token, challenge_id).await;

    let track = |value: f64| {
        let app = app.clone();
        let token = token.clone();
        async move {
            request(
                &app,
                Method::POST,
                &format!("/api/challenges/{challenge_id}/track"),
                Some(&token),
                Some(json!({ "progress_value": value })),
            )
            .await
        }
    };

    let (status, body) = track(26.0).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_progress"], 26.0);

    let (_, body) = track(24.0).await;
    assert_eq!(body["total_progress"], 24.0);

    // A slower time never replaces the best one.
    let (_, body) = track(30.0).await;
    assert_eq!(body["total_progress"], 24.0);
}

#[tokio::test]
async fn test_fastest_5k_from_runs_takes_best_qualifying() {
    let (app, _) = create_test_app().await;
    let (token, _) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;
    let challenge_id = create_active_challenge(&app, &token, club_id, "fastest_5k", 25.0).await;
    join(&app, &token, challenge_id).await;

    track_run(&app, &token, 5.0, 26.0).await;
    track_run(&app, &token, 5.2, 24.0).await;
    track_run(&app, &token, 10.0, 45.0).await; // not a 5k

    let entries = leaderboard(&app, &token, challenge_id).await;
    assert_eq!(entries[0]["progress_value"], 24.0);
}

#[tokio::test]
async fn test_fastest_5k_no_attempt_ranks_last() {
    let (app, _) = create_test_app().await;
    let (ada, _) = register_user(&app, "ada@example.com", "Ada").await;
    let (grace, _) = register_user(&app, "grace@example.com", "Grace").await;
    let club_id = create_club(&app, &ada, "Morning Milers").await;
    request(
        &app,
        Method::POST,
        &format!("/api/clubs/{club_id}/join"),
        Some(&grace),
        None,
    )
    .await;

    let challenge_id = create_active_challenge(&app, &ada, club_id, "fastest_5k", 25.0).await;
    // Ada joins first but never attempts; Grace logs a 5k.
    join(&app, &ada, challenge_id).await;
    join(&app, &grace, challenge_id).await;
    track_run(&app, &grace, 5.0, 27.0).await;

    let entries = leaderboard(&app, &ada, challenge_id).await;
    assert_eq!(entries[0]["user"]["name"], "Grace");
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[1]["user"]["name"], "Ada");
    assert_eq!(entries[1]["progress_value"], 0.0);
}

#[tokio::test]
async fn test_track_progress_requires_participation() {
    let (app, _) = create_test_app().await;
    let (token, _) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;
    let challenge_id =
        create_active_challenge(&app, &token, club_id, "total_distance", 10.0).await;

    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/challenges/{challenge_id}/track"),
        Some(&token),
        Some(json!({ "progress_value": 5.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_track_progress_rejects_oversized_image() {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    let (app, _) = create_test_app().await;
    let (token, _) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;
    let challenge_id =
        create_active_challenge(&app, &token, club_id, "total_distance", 10.0).await;
    join(&app, &token, challenge_id).await;

    let image = STANDARD.encode(vec![0u8; 5 * 1024 * 1024 + 1]);
    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/challenges/{challenge_id}/track"),
        Some(&token),
        Some(json!({ "progress_value": 5.0, "image": image })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_leave_deletes_progress_entries() {
    let (app, state) = create_test_app().await;
    let (token, user_id) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;
    let challenge_id =
        create_active_challenge(&app, &token, club_id, "total_distance", 10.0).await;
    join(&app, &token, challenge_id).await;

    request(
        &app,
        Method::POST,
        &format!("/api/challenges/{challenge_id}/track"),
        Some(&token),
        Some(json!({ "progress_value": 3.0, "notes": "walked it" })),
    )
    .await;

    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/challenges/{challenge_id}/leave"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let participant = state
        .db
        .find_participant(challenge_id as i32, user_id as i32)
        .await
        .unwrap();
    assert!(participant.is_none());

    // Leaving twice is an error.
    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/challenges/{challenge_id}/leave"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_challenge_type_cannot_change() {
    let (app, _) = create_test_app().await;
    let (token, _) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;
    let challenge_id =
        create_active_challenge(&app, &token, club_id, "total_distance", 10.0).await;

    let (status, _) = request(
        &app,
        Method::PUT,
        &format!("/api/challenges/{challenge_id}"),
        Some(&token),
        Some(json!({ "challenge_type": "fastest_5k" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Other fields stay editable.
    let (status, body) = request(
        &app,
        Method::PUT,
        &format!("/api/challenges/{challenge_id}"),
        Some(&token),
        Some(json!({ "title": "Renamed", "goal_value": 20.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["challenge"]["title"], "Renamed");
    assert_eq!(body["challenge"]["goal_value"], 20.0);
}

#[tokio::test]
async fn test_invalid_challenge_type_rejected() {
    let (app, _) = create_test_app().await;
    let (token, _) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;

    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/challenges/club/{club_id}"),
        Some(&token),
        Some(json!({
            "title": "Bad",
            "challenge_type": "longest_nap",
            "goal_value": 10.0,
            "start_date": "2026-02-01",
            "end_date": "2026-03-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_end_date_must_follow_start_date() {
    let (app, _) = create_test_app().await;
    let (token, _) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;

    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/challenges/club/{club_id}"),
        Some(&token),
        Some(json!({
            "title": "Backwards",
            "challenge_type": "total_distance",
            "goal_value": 10.0,
            "start_date": "2026-03-01",
            "end_date": "2026-02-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_complete_ends_challenge_and_blocks_joining() {
    let (app, _) = create_test_app().await;
    let (ada, _) = register_user(&app, "ada@example.com", "Ada").await;
    let (grace, _) = register_user(&app, "grace@example.com", "Grace").await;
    let club_id = create_club(&app, &ada, "Morning Milers").await;
    request(
        &app,
        Method::POST,
        &format!("/api/clubs/{club_id}/join"),
        Some(&grace),
        None,
    )
    .await;

    let challenge_id = create_active_challenge(&app, &ada, club_id, "total_distance", 10.0).await;
    join(&app, &ada, challenge_id).await;

    // Only admins complete challenges.
    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/challenges/{challenge_id}/complete"),
        Some(&grace),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/challenges/{challenge_id}/complete"),
        Some(&ada),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = join(&app, &grace, challenge_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Completing twice is an error.
    let (status, _) = request(
        &app,
        Method::POST,
        &format!("/api/challenges/{challenge_id}/complete"),
        Some(&ada),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_my_badges_counts_podium_finishes() {
    let (app, _) = create_test_app().await;
    let (ada, _) = register_user(&app, "ada@example.com", "Ada").await;
    let (grace, _) = register_user(&app, "grace@example.com", "Grace").await;
    let club_id = create_club(&app, &ada, "Morning Milers").await;
    request(
        &app,
        Method::POST,
        &format!("/api/clubs/{club_id}/join"),
        Some(&grace),
        None,
    )
    .await;

    let challenge_id = create_active_challenge(&app, &ada, club_id, "total_distance", 10.0).await;
    join(&app, &ada, challenge_id).await;
    join(&app, &grace, challenge_id).await;
    track_run(&app, &ada, 8.0, 40.0).await;
    track_run(&app, &grace, 3.0, 18.0).await;

    // No badges while the challenge is still running.
    let (_, body) = request(&app, Method::GET, "/api/challenges/my-badges", Some(&ada), None).await;
    assert_eq!(body["total_badges"], 0);

    request(
        &app,
        Method::POST,
        &format!("/api/challenges/{challenge_id}/complete"),
        Some(&ada),
        None,
    )
    .await;

    let (_, body) = request(&app, Method::GET, "/api/challenges/my-badges", Some(&ada), None).await;
    assert_eq!(body["first_place"], 1);
    assert_eq!(body["total_badges"], 1);

    let (_, body) = request(&app, Method::GET, "/api/challenges/my-badges", Some(&grace), None).await;
    assert_eq!(body["second_place"], 1);
}

#[tokio::test]
async fn test_update_progress_endpoint_refreshes_standings() {
    let (app, state) = create_test_app().await;
    let (token, user_id) = register_user(&app, "ada@example.com", "Ada").await;
    let club_id = create_club(&app, &token, "Morning Milers").await;
    let challenge_id =
        create_active_challenge(&app, &token, club_id, "total_distance", 10.0).await;
    join(&app, &token, challenge_id).await;

    // Simulate drift by writing a stale progress value directly.
    let participant = state
        .db
        .find_participant(challenge_id as i32, user_id as i32)
        .await
        .unwrap()
        .unwrap();
    state
        .db
        .set_participant_progress(participant, 99.0)
        .await
        .unwrap();

    track_run(&app, &token, 6.0, 30.0).await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/challenges/update-progress",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated_count"], 1);

    let refreshed = state
        .db
        .find_participant(challenge_id as i32, user_id as i32)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refreshed.progress_value, 6.0);
}
