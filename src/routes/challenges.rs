// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club challenges: CRUD, participation, progress tracking, leaderboards,
//! and badges.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::entities::challenge;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::routes::auth::UserResponse;
use crate::routes::clubs::{require_club, require_user};
use crate::services::progress::{
    apply_manual_entry, compute_progress, progress_percentage, sort_leaderboard, ChallengeType,
};
use crate::time_utils::parse_client_datetime;
use crate::AppState;

/// Decoded image payloads above this are rejected.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/challenges/club/{club_id}",
            get(list_for_club).post(create_challenge),
        )
        .route(
            "/api/challenges/{challenge_id}",
            put(update_challenge).delete(delete_challenge),
        )
        .route("/api/challenges/{challenge_id}/join", post(join_challenge))
        .route("/api/challenges/{challenge_id}/leave", post(leave_challenge))
        .route("/api/challenges/{challenge_id}/track", post(track_progress))
        .route("/api/challenges/update-progress", post(update_progress))
        .route(
            "/api/challenges/{challenge_id}/complete",
            post(complete_challenge),
        )
        .route(
            "/api/challenges/{challenge_id}/leaderboard",
            get(leaderboard),
        )
        .route("/api/challenges/my-badges", get(my_badges))
}

async fn require_challenge(state: &AppState, challenge_id: i32) -> Result<challenge::Model> {
    state
        .db
        .get_challenge(challenge_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))
}

fn challenge_type_of(challenge: &challenge::Model) -> Result<ChallengeType> {
    ChallengeType::from_str(&challenge.challenge_type).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "stored challenge {} has unknown type {}",
            challenge.id,
            challenge.challenge_type
        ))
    })
}

fn has_ended(challenge: &challenge::Model) -> bool {
    challenge.end_date <= Utc::now()
}

/// Recompute run-derived progress for every currently-active challenge the
/// user participates in. Returns how many participations were updated.
pub(crate) async fn refresh_active_progress(state: &AppState, user_id: i32) -> Result<usize> {
    let now = Utc::now();
    let mut updated = 0;

    for (participant, challenge) in state.db.participations_for_user(user_id).await? {
        if challenge.start_date > now || challenge.end_date < now {
            continue;
        }
        let challenge_type = challenge_type_of(&challenge)?;
        let runs = state
            .db
            .runs_in_range(user_id, challenge.start_date, challenge.end_date)
            .await?;
        let progress = compute_progress(challenge_type, &runs);
        state
            .db
            .set_participant_progress(participant, progress)
            .await?;
        updated += 1;
    }
    Ok(updated)
}

async fn list_for_club(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(club_id): Path<i32>,
) -> Result<Json<Vec<Value>>> {
    require_club(&state, club_id).await?;
    if !state.db.is_club_member(auth.user_id, club_id).await? {
        return Err(AppError::Forbidden(
            "Only club members can view challenges".to_string(),
        ));
    }

    let challenges = state.db.challenges_for_club(club_id).await?;
    let creators = state
        .db
        .get_users_by_ids(challenges.iter().map(|c| c.created_by).collect())
        .await?;

    let mut out = Vec::with_capacity(challenges.len());
    for challenge in challenges {
        let participant_count = state.db.challenge_participant_count(challenge.id).await?;
        let mine = state.db.find_participant(challenge.id, auth.user_id).await?;
        let creator = creators.get(&challenge.created_by).map(UserResponse::from);
        out.push(json!({
            "id": challenge.id,
            "club_id": challenge.club_id,
            "title": challenge.title,
            "description": challenge.description,
            "challenge_type": challenge.challenge_type,
            "goal_value": challenge.goal_value,
            "start_date": challenge.start_date,
            "end_date": challenge.end_date,
            "created_at": challenge.created_at,
            "created_by": creator,
            "participant_count": participant_count,
            "is_participating": mine.is_some(),
            "user_progress": mine.map(|p| p.progress_value),
        }));
    }
    Ok(Json(out))
}

#[derive(Deserialize)]
pub struct CreateChallengeRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    challenge_type: String,
    #[serde(default)]
    goal_value: f64,
    start_date: String,
    end_date: String,
}

async fn create_challenge(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(club_id): Path<i32>,
    Json(req): Json<CreateChallengeRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    require_club(&state, club_id).await?;
    if !state.db.is_club_admin(club_id, auth.user_id).await? {
        return Err(AppError::Forbidden(
            "Only club admins can create challenges".to_string(),
        ));
    }

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }
    let challenge_type = ChallengeType::from_str(&req.challenge_type).ok_or_else(|| {
        AppError::BadRequest(format!("Invalid challenge type: {}", req.challenge_type))
    })?;
    if req.goal_value <= 0.0 {
        return Err(AppError::BadRequest(
            "goal_value must be positive".to_string(),
        ));
    }

    let start_date = parse_client_datetime(&req.start_date)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {}", req.start_date)))?;
    let end_date = parse_client_datetime(&req.end_date)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {}", req.end_date)))?;
    if end_date <= start_date {
        return Err(AppError::BadRequest(
            "end_date must be after start_date".to_string(),
        ));
    }

    let creator = require_user(&state, auth.user_id).await?;
    let challenge = state
        .db
        .create_challenge(
            club_id,
            &creator,
            &req.title,
            req.description,
            challenge_type.as_str(),
            req.goal_value,
            start_date,
            end_date,
        )
        .await?;

    tracing::info!(
        challenge_id = challenge.id,
        club_id,
        challenge_type = challenge_type.as_str(),
        "Challenge created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Challenge created successfully",
            "challenge": challenge,
        })),
    ))
}

#[derive(Deserialize)]
pub struct UpdateChallengeRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    challenge_type: Option<String>,
    #[serde(default)]
    goal_value: Option<f64>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

async fn update_challenge(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(challenge_id): Path<i32>,
    Json(req): Json<UpdateChallengeRequest>,
) -> Result<Json<Value>> {
    let challenge = require_challenge(&state, challenge_id).await?;
    if !state.db.is_club_admin(challenge.club_id, auth.user_id).await? {
        return Err(AppError::Forbidden(
            "Only club admins can edit challenges".to_string(),
        ));
    }

    // The type fixes what progress_value means, so it can never change.
    if let Some(requested) = &req.challenge_type {
        if *requested != challenge.challenge_type {
            return Err(AppError::BadRequest(
                "challenge_type cannot be changed".to_string(),
            ));
        }
    }

    let title = match req.title {
        Some(t) if !t.trim().is_empty() => t,
        Some(_) => return Err(AppError::BadRequest("title cannot be empty".to_string())),
        None => challenge.title.clone(),
    };
    let description = match req.description {
        Some(d) => Some(d),
        None => challenge.description.clone(),
    };
    let goal_value = req.goal_value.unwrap_or(challenge.goal_value);
    if goal_value <= 0.0 {
        return Err(AppError::BadRequest(
            "goal_value must be positive".to_string(),
        ));
    }

    let start_date = match &req.start_date {
        Some(raw) => parse_client_datetime(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {raw}")))?,
        None => challenge.start_date,
    };
    let end_date = match &req.end_date {
        Some(raw) => parse_client_datetime(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {raw}")))?,
        None => challenge.end_date,
    };
    if end_date <= start_date {
        return Err(AppError::BadRequest(
            "end_date must be after start_date".to_string(),
        ));
    }

    let updated = state
        .db
        .update_challenge(challenge, title, description, goal_value, start_date, end_date)
        .await?;

    Ok(Json(json!({
        "message": "Challenge updated successfully",
        "challenge": updated,
    })))
}

async fn delete_challenge(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(challenge_id): Path<i32>,
) -> Result<Json<Value>> {
    let challenge = require_challenge(&state, challenge_id).await?;
    if !state.db.is_club_admin(challenge.club_id, auth.user_id).await? {
        return Err(AppError::Forbidden(
            "Only club admins can delete challenges".to_string(),
        ));
    }

    state.db.delete_challenge(challenge_id).await?;
    tracing::info!(challenge_id, user_id = auth.user_id, "Challenge deleted");

    Ok(Json(json!({ "message": "Challenge deleted" })))
}

async fn join_challenge(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(challenge_id): Path<i32>,
) -> Result<(StatusCode, Json<Value>)> {
    let challenge = require_challenge(&state, challenge_id).await?;
    if !state
        .db
        .is_club_member(auth.user_id, challenge.club_id)
        .await?
    {
        return Err(AppError::Forbidden(
            "Only club members can join challenges".to_string(),
        ));
    }
    if has_ended(&challenge) {
        return Err(AppError::BadRequest(
            "Challenge has already ended".to_string(),
        ));
    }
    if state
        .db
        .find_participant(challenge_id, auth.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Already participating in this challenge".to_string(),
        ));
    }

    // Seed the standing from runs already inside the challenge window.
    let challenge_type = challenge_type_of(&challenge)?;
    let runs = state
        .db
        .runs_in_range(auth.user_id, challenge.start_date, challenge.end_date)
        .await?;
    let initial_progress = compute_progress(challenge_type, &runs);

    let participant = state
        .db
        .join_challenge(challenge_id, auth.user_id, initial_progress)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Joined challenge successfully",
            "participant": participant,
        })),
    ))
}

async fn leave_challenge(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(challenge_id): Path<i32>,
) -> Result<Json<Value>> {
    require_challenge(&state, challenge_id).await?;
    let participant = state
        .db
        .find_participant(challenge_id, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("Not participating in this challenge".to_string())
        })?;

    state.db.leave_challenge(participant).await?;

    Ok(Json(json!({ "message": "Left challenge successfully" })))
}

#[derive(Deserialize)]
pub struct TrackProgressRequest {
    progress_value: f64,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

async fn track_progress(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(challenge_id): Path<i32>,
    Json(req): Json<TrackProgressRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let challenge = require_challenge(&state, challenge_id).await?;
    let participant = state
        .db
        .find_participant(challenge_id, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Forbidden("Not participating in this challenge".to_string())
        })?;

    if has_ended(&challenge) {
        return Err(AppError::BadRequest(
            "Challenge has already ended".to_string(),
        ));
    }
    if req.progress_value <= 0.0 {
        return Err(AppError::BadRequest(
            "progress_value must be positive".to_string(),
        ));
    }

    let image_data = match req.image {
        Some(image) if !image.is_empty() => {
            // Tolerate data-URL prefixes from browser uploads.
            let encoded = image
                .rsplit_once("base64,")
                .map(|(_, data)| data)
                .unwrap_or(image.as_str());
            let decoded = BASE64
                .decode(encoded)
                .map_err(|_| AppError::BadRequest("Invalid image encoding".to_string()))?;
            if decoded.len() > MAX_IMAGE_BYTES {
                return Err(AppError::BadRequest(
                    "Image exceeds the 5 MB limit".to_string(),
                ));
            }
            Some(image)
        }
        _ => None,
    };

    let challenge_type = challenge_type_of(&challenge)?;
    let new_total = apply_manual_entry(challenge_type, participant.progress_value, req.progress_value);

    let entry = state
        .db
        .add_progress_entry(participant, new_total, req.progress_value, req.notes, image_data)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Progress tracked successfully",
            "entry_id": entry.id,
            "total_progress": new_total,
        })),
    ))
}

async fn update_progress(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>> {
    let updated = refresh_active_progress(&state, auth.user_id).await?;
    Ok(Json(json!({
        "message": "Progress updated",
        "updated_count": updated,
    })))
}

async fn complete_challenge(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(challenge_id): Path<i32>,
) -> Result<Json<Value>> {
    let challenge = require_challenge(&state, challenge_id).await?;
    if !state.db.is_club_admin(challenge.club_id, auth.user_id).await? {
        return Err(AppError::Forbidden(
            "Only club admins can complete challenges".to_string(),
        ));
    }
    if has_ended(&challenge) {
        return Err(AppError::BadRequest(
            "Challenge has already ended".to_string(),
        ));
    }

    let completed = state.db.complete_challenge(challenge).await?;

    Ok(Json(json!({
        "message": "Challenge completed",
        "challenge": completed,
    })))
}

async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(challenge_id): Path<i32>,
) -> Result<Json<Value>> {
    let challenge = require_challenge(&state, challenge_id).await?;
    if !state
        .db
        .is_club_member(auth.user_id, challenge.club_id)
        .await?
    {
        return Err(AppError::Forbidden(
            "Only club members can view the leaderboard".to_string(),
        ));
    }

    let challenge_type = challenge_type_of(&challenge)?;
    let mut participants = state.db.challenge_participants(challenge_id).await?;
    sort_leaderboard(challenge_type, &mut participants, |p| p.progress_value);

    let users = state
        .db
        .get_users_by_ids(participants.iter().map(|p| p.user_id).collect())
        .await?;

    let entries: Vec<Value> = participants
        .iter()
        .enumerate()
        .map(|(i, p)| {
            json!({
                "rank": i + 1,
                "user": users.get(&p.user_id).map(UserResponse::from),
                "progress_value": p.progress_value,
                "progress_percentage": progress_percentage(challenge.goal_value, p.progress_value),
                "is_current_user": p.user_id == auth.user_id,
                "joined_at": p.joined_at,
            })
        })
        .collect();

    Ok(Json(json!({
        "challenge": challenge,
        "leaderboard": entries,
    })))
}

async fn my_badges(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>> {
    let mut first_place = 0;
    let mut second_place = 0;
    let mut third_place = 0;

    for (_, challenge) in state.db.participations_for_user(auth.user_id).await? {
        if !has_ended(&challenge) {
            continue;
        }
        let challenge_type = challenge_type_of(&challenge)?;
        let mut participants = state.db.challenge_participants(challenge.id).await?;
        sort_leaderboard(challenge_type, &mut participants, |p| p.progress_value);

        match participants.iter().position(|p| p.user_id == auth.user_id) {
            Some(0) => first_place += 1,
            Some(1) => second_place += 1,
            Some(2) => third_place += 1,
            _ => {}
        }
    }

    Ok(Json(json!({
        "first_place": first_place,
        "second_place": second_place,
        "third_place": third_place,
        "total_badges": first_place + second_place + third_place,
    })))
}
