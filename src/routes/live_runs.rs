// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live run sharing: sessions, location updates, and club viewers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::routes::auth::UserResponse;
use crate::routes::clubs::require_club;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/runs/live/start", post(start_session))
        .route("/api/runs/live/{session_id}/location", post(add_location))
        .route("/api/runs/live/{session_id}/stop", post(stop_session))
        .route("/api/runs/live/active/{club_id}", get(active_sessions))
}

#[derive(Deserialize)]
pub struct StartSessionRequest {
    #[serde(default)]
    club_id: Option<i32>,
}

async fn start_session(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    if let Some(club_id) = req.club_id {
        require_club(&state, club_id).await?;
        if !state.db.is_club_member(auth.user_id, club_id).await? {
            return Err(AppError::Forbidden(
                "Cannot share a live run with a club you are not in".to_string(),
            ));
        }
    }

    let session = state
        .db
        .start_live_session(auth.user_id, req.club_id)
        .await?;

    tracing::info!(session_id = session.id, user_id = auth.user_id, "Live run started");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Live run started",
            "session": session,
        })),
    ))
}

#[derive(Deserialize)]
pub struct LocationRequest {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    accuracy: Option<f64>,
    #[serde(default)]
    speed: Option<f64>,
}

async fn add_location(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<i32>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<Value>> {
    let session = state
        .db
        .get_live_session(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Live run session not found".to_string()))?;

    if session.user_id != auth.user_id {
        return Err(AppError::Forbidden(
            "Only the runner can report locations".to_string(),
        ));
    }
    if session.status == "stopped" {
        return Err(AppError::BadRequest(
            "Session has already been stopped".to_string(),
        ));
    }

    let location = state
        .db
        .add_live_location(session, req.latitude, req.longitude, req.accuracy, req.speed)
        .await?;

    Ok(Json(json!({
        "message": "Location recorded",
        "location": location,
    })))
}

async fn stop_session(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<i32>,
) -> Result<Json<Value>> {
    let session = state
        .db
        .get_live_session(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Live run session not found".to_string()))?;

    if session.user_id != auth.user_id {
        return Err(AppError::Forbidden(
            "Only the runner can stop the session".to_string(),
        ));
    }

    let stopped = state.db.stop_live_session(session).await?;

    Ok(Json(json!({
        "message": "Live run stopped",
        "session": stopped,
    })))
}

async fn active_sessions(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(club_id): Path<i32>,
) -> Result<Json<Vec<Value>>> {
    require_club(&state, club_id).await?;
    if !state.db.is_club_member(auth.user_id, club_id).await? {
        return Err(AppError::Forbidden(
            "Only club members can watch live runs".to_string(),
        ));
    }

    let sessions = state.db.active_sessions_for_club(club_id).await?;
    let runners = state
        .db
        .get_users_by_ids(sessions.iter().map(|(s, _)| s.user_id).collect())
        .await?;

    let out = sessions
        .into_iter()
        .map(|(session, latest)| {
            json!({
                "id": session.id,
                "user": runners.get(&session.user_id).map(UserResponse::from),
                "started_at": session.started_at,
                "last_location_update": session.last_location_update,
                "status": session.status,
                "latest_location": latest,
            })
        })
        .collect();

    Ok(Json(out))
}
