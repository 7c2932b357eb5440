// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User-facing routes: the club activity feed and bulk CSV import.

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::routes::auth::UserResponse;
use crate::routes::clubs::require_club;
use crate::services::feed::{match_run, parse_run_description};
use crate::services::password;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/activity-feed/{club_id}", get(activity_feed))
        .route("/api/users/bulk-import", post(bulk_import))
}

/// The latest run activities for a club, each enriched with the matching
/// run's details when the description can be reconciled against the
/// author's run history.
async fn activity_feed(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(club_id): Path<i32>,
) -> Result<Json<Vec<Value>>> {
    require_club(&state, club_id).await?;
    if !state.db.is_club_member(auth.user_id, club_id).await? {
        return Err(AppError::Forbidden(
            "Only club members can view the activity feed".to_string(),
        ));
    }

    let activities = state.db.run_feed_for_club(club_id).await?;
    let authors = state
        .db
        .get_users_by_ids(activities.iter().map(|a| a.user_id).collect())
        .await?;

    let mut out = Vec::with_capacity(activities.len());
    for activity in activities {
        let run_details = match parse_run_description(&activity.description) {
            Some((distance, speed)) => {
                let window = Duration::hours(24);
                let candidates = state
                    .db
                    .runs_in_range(
                        activity.user_id,
                        activity.created_at - window,
                        activity.created_at + window,
                    )
                    .await?;
                match_run(distance, speed, &candidates).map(|run| {
                    json!({
                        "id": run.id,
                        "distance_km": run.distance_km,
                        "duration_minutes": run.duration_minutes,
                        "speed_kmh": run.speed_kmh,
                        "date": run.date,
                        "notes": run.notes,
                    })
                })
            }
            None => None,
        };

        out.push(json!({
            "id": activity.id,
            "user": authors.get(&activity.user_id).map(UserResponse::from),
            "activity_type": activity.activity_type,
            "description": activity.description,
            "created_at": activity.created_at,
            "run": run_details,
        }));
    }
    Ok(Json(out))
}

/// Import users from an uploaded CSV with columns name, email, password,
/// and optional address (header names are case-insensitive). Existing
/// emails are skipped; malformed rows are reported without aborting the
/// import.
async fn bulk_import(
    State(state): State<Arc<AppState>>,
    Extension(_auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

    let mut reader = csv::Reader::from_reader(&data[..]);
    let headers = reader
        .headers()
        .map_err(|e| AppError::BadRequest(format!("Invalid CSV: {e}")))?
        .clone();

    let column = |name: &str| -> Option<usize> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let name_col =
        column("name").ok_or_else(|| AppError::BadRequest("Missing column: name".to_string()))?;
    let email_col =
        column("email").ok_or_else(|| AppError::BadRequest("Missing column: email".to_string()))?;
    let password_col = column("password")
        .ok_or_else(|| AppError::BadRequest("Missing column: password".to_string()))?;
    let address_col = column("address");

    let mut created_users: Vec<UserResponse> = Vec::new();
    let mut skipped_users: Vec<String> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for (row_index, record) in reader.records().enumerate() {
        // Header is row 1 in the file the user sees.
        let row_number = row_index + 2;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                errors.push(format!("Row {row_number}: {e}"));
                continue;
            }
        };

        let field = |col: usize| record.get(col).unwrap_or("").trim().to_string();
        let name = field(name_col);
        let email = field(email_col);
        let password = field(password_col);
        let address = address_col.map(|c| field(c)).filter(|a| !a.is_empty());

        if name.is_empty() || email.is_empty() || password.is_empty() {
            errors.push(format!(
                "Row {row_number}: name, email and password are required"
            ));
            continue;
        }

        if state.db.find_user_by_email(&email).await?.is_some() {
            skipped_users.push(email);
            continue;
        }

        let password_hash = password::hash_password(&password)?;
        let user = state
            .db
            .create_user(&email, &password_hash, &name, address)
            .await?;
        created_users.push(UserResponse::from(&user));
    }

    tracing::info!(
        created = created_users.len(),
        skipped = skipped_users.len(),
        errors = errors.len(),
        "Bulk user import finished"
    );

    Ok(Json(json!({
        "created_count": created_users.len(),
        "skipped_count": skipped_users.len(),
        "error_count": errors.len(),
        "created_users": created_users,
        "skipped_users": skipped_users,
        "errors": errors,
    })))
}
