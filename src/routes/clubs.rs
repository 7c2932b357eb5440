// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::entities::{club, user};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::routes::auth::UserResponse;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/clubs", get(list_clubs).post(create_club))
        .route("/api/clubs/{club_id}", get(get_club).delete(delete_club))
        .route("/api/clubs/{club_id}/join", post(join_club))
        .route(
            "/api/clubs/{club_id}/promote/{user_id}",
            post(promote_member),
        )
}

#[derive(Deserialize)]
pub struct CreateClubRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Serialize)]
pub struct ClubSummary {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub created_by: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub member_count: u64,
    pub is_member: bool,
}

async fn list_clubs(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<ClubSummary>>> {
    let clubs = state.db.list_clubs().await?;

    let mut out = Vec::with_capacity(clubs.len());
    for club in clubs {
        let member_count = state.db.club_member_count(club.id).await?;
        let is_member = state.db.is_club_member(auth.user_id, club.id).await?;
        out.push(summarize(club, member_count, is_member));
    }
    Ok(Json(out))
}

fn summarize(club: club::Model, member_count: u64, is_member: bool) -> ClubSummary {
    ClubSummary {
        id: club.id,
        name: club.name,
        description: club.description,
        location: club.location,
        created_by: club.created_by,
        created_at: club.created_at,
        member_count,
        is_member,
    }
}

async fn create_club(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateClubRequest>,
) -> Result<(StatusCode, Json<ClubSummary>)> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Club name is required".to_string()));
    }

    let creator = require_user(&state, auth.user_id).await?;
    let club = state
        .db
        .create_club(&req.name, req.description, req.location, &creator)
        .await?;

    tracing::info!(club_id = club.id, user_id = creator.id, "Club created");

    Ok((StatusCode::CREATED, Json(summarize(club, 1, true))))
}

async fn get_club(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(club_id): Path<i32>,
) -> Result<Json<Value>> {
    let club = require_club(&state, club_id).await?;
    let members = state.db.club_members(club_id).await?;
    let member_views: Vec<UserResponse> = members.iter().map(UserResponse::from).collect();

    Ok(Json(json!({
        "id": club.id,
        "name": club.name,
        "description": club.description,
        "location": club.location,
        "created_by": club.created_by,
        "created_at": club.created_at,
        "member_count": member_views.len(),
        "members": member_views,
        "is_creator": club.created_by == auth.user_id,
        "is_member": members.iter().any(|m| m.id == auth.user_id),
    })))
}

async fn join_club(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(club_id): Path<i32>,
) -> Result<Json<Value>> {
    require_club(&state, club_id).await?;

    if state.db.is_club_member(auth.user_id, club_id).await? {
        return Err(AppError::BadRequest(
            "Already a member of this club".to_string(),
        ));
    }

    let joiner = require_user(&state, auth.user_id).await?;
    state.db.add_club_member(club_id, &joiner).await?;

    Ok(Json(json!({ "message": "Joined club successfully" })))
}

async fn promote_member(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((club_id, user_id)): Path<(i32, i32)>,
) -> Result<Json<Value>> {
    require_club(&state, club_id).await?;

    if !state.db.is_club_admin(club_id, auth.user_id).await? {
        return Err(AppError::Forbidden(
            "Only club admins can promote members".to_string(),
        ));
    }
    if !state.db.is_club_member(user_id, club_id).await? {
        return Err(AppError::BadRequest(
            "User is not a member of this club".to_string(),
        ));
    }
    if state.db.has_admin_row(club_id, user_id).await? {
        return Err(AppError::BadRequest("User is already an admin".to_string()));
    }

    state.db.promote_club_admin(club_id, user_id).await?;

    Ok(Json(json!({ "message": "Member promoted to admin" })))
}

async fn delete_club(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(club_id): Path<i32>,
) -> Result<Json<Value>> {
    let club = require_club(&state, club_id).await?;

    if club.created_by != auth.user_id {
        return Err(AppError::Forbidden(
            "Only the club creator can delete the club".to_string(),
        ));
    }

    state.db.delete_club(club_id).await?;
    tracing::info!(club_id, user_id = auth.user_id, "Club deleted");

    Ok(Json(json!({ "message": "Club deleted" })))
}

pub(crate) async fn require_user(state: &AppState, user_id: i32) -> Result<user::Model> {
    state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub(crate) async fn require_club(state: &AppState, club_id: i32) -> Result<club::Model> {
    state
        .db
        .get_club(club_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Club not found".to_string()))
}
