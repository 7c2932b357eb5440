// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live run session storage.

use super::Db;
use crate::entities::prelude::{LiveRunLocation, LiveRunSession};
use crate::entities::{live_run_location, live_run_session};
use crate::error::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

impl Db {
    /// Open a live session for a user, optionally shared with a club.
    pub async fn start_live_session(
        &self,
        user_id: i32,
        club_id: Option<i32>,
    ) -> Result<live_run_session::Model> {
        let now = Utc::now();
        Ok(live_run_session::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            club_id: ActiveValue::Set(club_id),
            started_at: ActiveValue::Set(now),
            last_location_update: ActiveValue::Set(now),
            status: ActiveValue::Set("active".to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?)
    }

    pub async fn get_live_session(
        &self,
        session_id: i32,
    ) -> Result<Option<live_run_session::Model>> {
        Ok(LiveRunSession::find_by_id(session_id)
            .one(&self.conn)
            .await?)
    }

    /// Append a GPS fix and bump the session's last-update timestamp.
    pub async fn add_live_location(
        &self,
        session: live_run_session::Model,
        latitude: f64,
        longitude: f64,
        accuracy: Option<f64>,
        speed: Option<f64>,
    ) -> Result<live_run_location::Model> {
        let now = Utc::now();
        let txn = self.conn.begin().await?;

        let location = live_run_location::ActiveModel {
            session_id: ActiveValue::Set(session.id),
            latitude: ActiveValue::Set(latitude),
            longitude: ActiveValue::Set(longitude),
            accuracy: ActiveValue::Set(accuracy),
            speed: ActiveValue::Set(speed),
            timestamp: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut am: live_run_session::ActiveModel = session.into();
        am.last_location_update = ActiveValue::Set(now);
        am.update(&txn).await?;

        txn.commit().await?;
        Ok(location)
    }

    pub async fn stop_live_session(
        &self,
        session: live_run_session::Model,
    ) -> Result<live_run_session::Model> {
        let mut am: live_run_session::ActiveModel = session.into();
        am.status = ActiveValue::Set("stopped".to_string());
        Ok(am.update(&self.conn).await?)
    }

    /// Active sessions shared with a club, each with its most recent
    /// location (if any fix has been reported yet).
    pub async fn active_sessions_for_club(
        &self,
        club_id: i32,
    ) -> Result<Vec<(live_run_session::Model, Option<live_run_location::Model>)>> {
        let sessions = LiveRunSession::find()
            .filter(live_run_session::Column::ClubId.eq(club_id))
            .filter(live_run_session::Column::Status.eq("active"))
            .order_by_desc(live_run_session::Column::StartedAt)
            .all(&self.conn)
            .await?;

        let mut out = Vec::with_capacity(sessions.len());
        for session in sessions {
            let latest = LiveRunLocation::find()
                .filter(live_run_location::Column::SessionId.eq(session.id))
                .order_by_desc(live_run_location::Column::Timestamp)
                .one(&self.conn)
                .await?;
            out.push((session, latest));
        }
        Ok(out)
    }
}
