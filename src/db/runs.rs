// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run and scheduled-run storage operations.

use super::Db;
use crate::entities::prelude::{ClubMember, Run, ScheduledRun, ScheduledRunParticipant};
use crate::entities::{
    activity, club_member, run, scheduled_run, scheduled_run_participant, user,
};
use crate::error::Result;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

impl Db {
    /// Record a run and post a matching `run` activity to every club the
    /// user belongs to, in one transaction. The same description string is
    /// shared by all activities so the feed reconciliation sees identical
    /// text everywhere.
    pub async fn create_run(
        &self,
        user: &user::Model,
        distance_km: f64,
        duration_minutes: f64,
        speed_kmh: f64,
        date: DateTime<Utc>,
        notes: Option<String>,
        feed_description: &str,
    ) -> Result<run::Model> {
        let now = Utc::now();
        let txn = self.conn.begin().await?;

        let model = run::ActiveModel {
            user_id: ActiveValue::Set(user.id),
            distance_km: ActiveValue::Set(distance_km),
            duration_minutes: ActiveValue::Set(duration_minutes),
            speed_kmh: ActiveValue::Set(speed_kmh),
            date: ActiveValue::Set(date),
            notes: ActiveValue::Set(notes),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let memberships = ClubMember::find()
            .filter(club_member::Column::UserId.eq(user.id))
            .all(&txn)
            .await?;
        for membership in memberships {
            activity::ActiveModel {
                club_id: ActiveValue::Set(membership.club_id),
                user_id: ActiveValue::Set(user.id),
                activity_type: ActiveValue::Set("run".to_string()),
                description: ActiveValue::Set(feed_description.to_string()),
                created_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(model)
    }

    /// All runs for a user, newest first.
    pub async fn runs_for_user(&self, user_id: i32) -> Result<Vec<run::Model>> {
        Ok(Run::find()
            .filter(run::Column::UserId.eq(user_id))
            .order_by_desc(run::Column::Date)
            .all(&self.conn)
            .await?)
    }

    /// Runs for a user with dates inside [start, end], newest first.
    /// Feeds both challenge aggregation and feed reconciliation.
    pub async fn runs_in_range(
        &self,
        user_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<run::Model>> {
        Ok(Run::find()
            .filter(run::Column::UserId.eq(user_id))
            .filter(run::Column::Date.gte(start))
            .filter(run::Column::Date.lte(end))
            .order_by_desc(run::Column::Date)
            .all(&self.conn)
            .await?)
    }

    /// Schedule a group run. The creator is signed up automatically and a
    /// `schedule_run` activity is posted to the club.
    pub async fn create_scheduled_run(
        &self,
        club_id: i32,
        creator: &user::Model,
        title: &str,
        description: Option<String>,
        scheduled_date: DateTime<Utc>,
        location: Option<String>,
    ) -> Result<scheduled_run::Model> {
        let now = Utc::now();
        let txn = self.conn.begin().await?;

        let model = scheduled_run::ActiveModel {
            club_id: ActiveValue::Set(club_id),
            created_by: ActiveValue::Set(creator.id),
            title: ActiveValue::Set(title.to_string()),
            description: ActiveValue::Set(description),
            scheduled_date: ActiveValue::Set(scheduled_date),
            location: ActiveValue::Set(location),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        ScheduledRunParticipant::insert(scheduled_run_participant::ActiveModel {
            user_id: ActiveValue::Set(creator.id),
            scheduled_run_id: ActiveValue::Set(model.id),
        })
        .exec_without_returning(&txn)
        .await?;

        activity::ActiveModel {
            club_id: ActiveValue::Set(club_id),
            user_id: ActiveValue::Set(creator.id),
            activity_type: ActiveValue::Set("schedule_run".to_string()),
            description: ActiveValue::Set(format!(
                "{} scheduled a run: {}",
                creator.name, model.title
            )),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(model)
    }

    /// Scheduled runs for a club in date order.
    pub async fn scheduled_runs_for_club(&self, club_id: i32) -> Result<Vec<scheduled_run::Model>> {
        Ok(ScheduledRun::find()
            .filter(scheduled_run::Column::ClubId.eq(club_id))
            .order_by_asc(scheduled_run::Column::ScheduledDate)
            .all(&self.conn)
            .await?)
    }

    /// How many people signed up for a scheduled run.
    pub async fn scheduled_run_participant_count(&self, scheduled_run_id: i32) -> Result<u64> {
        Ok(ScheduledRunParticipant::find()
            .filter(scheduled_run_participant::Column::ScheduledRunId.eq(scheduled_run_id))
            .count(&self.conn)
            .await?)
    }
}
