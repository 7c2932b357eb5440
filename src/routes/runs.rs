// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run tracking and scheduled group runs.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::routes::auth::UserResponse;
use crate::routes::clubs::{require_club, require_user};
use crate::time_utils::parse_client_datetime;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/runs/track", post(track_run))
        .route("/api/runs/my-progress", get(my_progress))
        .route("/api/runs/schedule", post(schedule_run))
        .route("/api/runs/schedule/{club_id}", get(scheduled_runs))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Deserialize)]
pub struct TrackRunRequest {
    distance_km: f64,
    duration_minutes: f64,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

async fn track_run(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<TrackRunRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    if req.distance_km <= 0.0 {
        return Err(AppError::BadRequest(
            "distance_km must be positive".to_string(),
        ));
    }

    let date = match &req.date {
        Some(raw) => parse_client_datetime(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {raw}")))?,
        None => Utc::now(),
    };

    let speed_kmh = if req.duration_minutes > 0.0 {
        req.distance_km / req.duration_minutes * 60.0
    } else {
        0.0
    };

    let user = require_user(&state, auth.user_id).await?;
    let description = format!(
        "{} ran {:.2} km at {:.2} km/h",
        user.name, req.distance_km, speed_kmh
    );

    let run = state
        .db
        .create_run(
            &user,
            req.distance_km,
            req.duration_minutes,
            speed_kmh,
            date,
            req.notes,
            &description,
        )
        .await?;

    // Keep active challenge standings in sync with the new run.
    let updated = super::challenges::refresh_active_progress(&state, auth.user_id).await?;

    tracing::info!(
        run_id = run.id,
        user_id = auth.user_id,
        distance_km = req.distance_km,
        challenges_updated = updated,
        "Run tracked"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Run tracked successfully",
            "run": run,
        })),
    ))
}

async fn my_progress(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>> {
    let runs = state.db.runs_for_user(auth.user_id).await?;

    let total_runs = runs.len();
    let total_distance: f64 = runs.iter().map(|r| r.distance_km).sum();
    let total_duration: f64 = runs.iter().map(|r| r.duration_minutes).sum();
    let average_speed = if total_duration > 0.0 {
        total_distance / total_duration * 60.0
    } else {
        0.0
    };

    Ok(Json(json!({
        "runs": runs,
        "statistics": {
            "total_runs": total_runs,
            "total_distance_km": round2(total_distance),
            "total_duration_minutes": round2(total_duration),
            "average_speed_kmh": round2(average_speed),
        },
    })))
}

#[derive(Deserialize)]
pub struct ScheduleRunRequest {
    club_id: i32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    scheduled_date: String,
    #[serde(default)]
    location: Option<String>,
}

async fn schedule_run(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<ScheduleRunRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }
    let scheduled_date = parse_client_datetime(&req.scheduled_date)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {}", req.scheduled_date)))?;

    require_club(&state, req.club_id).await?;
    if !state.db.is_club_member(auth.user_id, req.club_id).await? {
        return Err(AppError::Forbidden(
            "Only club members can schedule runs".to_string(),
        ));
    }

    let creator = require_user(&state, auth.user_id).await?;
    let scheduled = state
        .db
        .create_scheduled_run(
            req.club_id,
            &creator,
            &req.title,
            req.description,
            scheduled_date,
            req.location,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Run scheduled successfully",
            "scheduled_run": scheduled,
        })),
    ))
}

async fn scheduled_runs(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(club_id): Path<i32>,
) -> Result<Json<Vec<Value>>> {
    require_club(&state, club_id).await?;
    if !state.db.is_club_member(auth.user_id, club_id).await? {
        return Err(AppError::Forbidden(
            "Only club members can view scheduled runs".to_string(),
        ));
    }

    let runs = state.db.scheduled_runs_for_club(club_id).await?;
    let creators = state
        .db
        .get_users_by_ids(runs.iter().map(|r| r.created_by).collect())
        .await?;

    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        let participant_count = state.db.scheduled_run_participant_count(run.id).await?;
        let creator = creators.get(&run.created_by).map(UserResponse::from);
        out.push(json!({
            "id": run.id,
            "club_id": run.club_id,
            "title": run.title,
            "description": run.description,
            "scheduled_date": run.scheduled_date,
            "location": run.location,
            "created_at": run.created_at,
            "created_by": creator,
            "participant_count": participant_count,
        }));
    }
    Ok(Json(out))
}
