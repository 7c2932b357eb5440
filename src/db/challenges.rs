// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge storage: challenges, participants, and manual progress
//! entries.

use super::Db;
use crate::entities::prelude::{Challenge, ChallengeParticipant, ChallengeProgressEntry};
use crate::entities::{
    activity, challenge, challenge_participant, challenge_progress_entry, user,
};
use crate::error::Result;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

impl Db {
    /// Create a challenge and announce it in the club feed.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_challenge(
        &self,
        club_id: i32,
        creator: &user::Model,
        title: &str,
        description: Option<String>,
        challenge_type: &str,
        goal_value: f64,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<challenge::Model> {
        let now = Utc::now();
        let txn = self.conn.begin().await?;

        let model = challenge::ActiveModel {
            club_id: ActiveValue::Set(club_id),
            created_by: ActiveValue::Set(creator.id),
            title: ActiveValue::Set(title.to_string()),
            description: ActiveValue::Set(description),
            challenge_type: ActiveValue::Set(challenge_type.to_string()),
            goal_value: ActiveValue::Set(goal_value),
            start_date: ActiveValue::Set(start_date),
            end_date: ActiveValue::Set(end_date),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        activity::ActiveModel {
            club_id: ActiveValue::Set(club_id),
            user_id: ActiveValue::Set(creator.id),
            activity_type: ActiveValue::Set("challenge".to_string()),
            description: ActiveValue::Set(format!(
                "{} created a challenge: {}",
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

    pub async fn get_challenge(&self, challenge_id: i32) -> Result<Option<challenge::Model>> {
        Ok(Challenge::find_by_id(challenge_id).one(&self.conn).await?)
    }

    /// Challenges for a club, newest first.
    pub async fn challenges_for_club(&self, club_id: i32) -> Result<Vec<challenge::Model>> {
        Ok(Challenge::find()
            .filter(challenge::Column::ClubId.eq(club_id))
            .order_by_desc(challenge::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    pub async fn update_challenge(
        &self,
        stored: challenge::Model,
        title: String,
        description: Option<String>,
        goal_value: f64,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<challenge::Model> {
        let mut am: challenge::ActiveModel = stored.into();
        am.title = ActiveValue::Set(title);
        am.description = ActiveValue::Set(description);
        am.goal_value = ActiveValue::Set(goal_value);
        am.start_date = ActiveValue::Set(start_date);
        am.end_date = ActiveValue::Set(end_date);
        Ok(am.update(&self.conn).await?)
    }

    /// End a challenge now.
    pub async fn complete_challenge(&self, stored: challenge::Model) -> Result<challenge::Model> {
        let mut am: challenge::ActiveModel = stored.into();
        am.end_date = ActiveValue::Set(Utc::now());
        Ok(am.update(&self.conn).await?)
    }

    /// Delete a challenge; participants and progress entries cascade.
    pub async fn delete_challenge(&self, challenge_id: i32) -> Result<()> {
        Challenge::delete_by_id(challenge_id)
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn challenge_participant_count(&self, challenge_id: i32) -> Result<u64> {
        Ok(ChallengeParticipant::find()
            .filter(challenge_participant::Column::ChallengeId.eq(challenge_id))
            .count(&self.conn)
            .await?)
    }

    pub async fn find_participant(
        &self,
        challenge_id: i32,
        user_id: i32,
    ) -> Result<Option<challenge_participant::Model>> {
        Ok(ChallengeParticipant::find()
            .filter(challenge_participant::Column::ChallengeId.eq(challenge_id))
            .filter(challenge_participant::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await?)
    }

    /// Participants in join order. The leaderboard sort is stable on top of
    /// this, so ties keep join order.
    pub async fn challenge_participants(
        &self,
        challenge_id: i32,
    ) -> Result<Vec<challenge_participant::Model>> {
        Ok(ChallengeParticipant::find()
            .filter(challenge_participant::Column::ChallengeId.eq(challenge_id))
            .order_by_asc(challenge_participant::Column::JoinedAt)
            .all(&self.conn)
            .await?)
    }

    pub async fn join_challenge(
        &self,
        challenge_id: i32,
        user_id: i32,
        initial_progress: f64,
    ) -> Result<challenge_participant::Model> {
        Ok(challenge_participant::ActiveModel {
            challenge_id: ActiveValue::Set(challenge_id),
            user_id: ActiveValue::Set(user_id),
            progress_value: ActiveValue::Set(initial_progress),
            joined_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?)
    }

    /// Remove a participant together with every progress entry they logged.
    pub async fn leave_challenge(
        &self,
        participant: challenge_participant::Model,
    ) -> Result<()> {
        let txn = self.conn.begin().await?;
        ChallengeProgressEntry::delete_many()
            .filter(challenge_progress_entry::Column::ParticipantId.eq(participant.id))
            .exec(&txn)
            .await?;
        ChallengeParticipant::delete_by_id(participant.id)
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn set_participant_progress(
        &self,
        participant: challenge_participant::Model,
        progress_value: f64,
    ) -> Result<challenge_participant::Model> {
        let mut am: challenge_participant::ActiveModel = participant.into();
        am.progress_value = ActiveValue::Set(progress_value);
        Ok(am.update(&self.conn).await?)
    }

    /// Log a manual progress entry and update the participant's running
    /// total in the same transaction.
    pub async fn add_progress_entry(
        &self,
        participant: challenge_participant::Model,
        new_total: f64,
        entry_value: f64,
        notes: Option<String>,
        image_data: Option<String>,
    ) -> Result<challenge_progress_entry::Model> {
        let txn = self.conn.begin().await?;

        let entry = challenge_progress_entry::ActiveModel {
            participant_id: ActiveValue::Set(participant.id),
            challenge_id: ActiveValue::Set(participant.challenge_id),
            user_id: ActiveValue::Set(participant.user_id),
            progress_value: ActiveValue::Set(entry_value),
            notes: ActiveValue::Set(notes),
            image_data: ActiveValue::Set(image_data),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut am: challenge_participant::ActiveModel = participant.into();
        am.progress_value = ActiveValue::Set(new_total);
        am.update(&txn).await?;

        txn.commit().await?;
        Ok(entry)
    }

    /// All of a user's participations, paired with the challenge rows.
    pub async fn participations_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<(challenge_participant::Model, challenge::Model)>> {
        let participants = ChallengeParticipant::find()
            .filter(challenge_participant::Column::UserId.eq(user_id))
            .all(&self.conn)
            .await?;
        if participants.is_empty() {
            return Ok(vec![]);
        }

        let challenge_ids: Vec<i32> = participants.iter().map(|p| p.challenge_id).collect();
        let challenges: std::collections::HashMap<i32, challenge::Model> = Challenge::find()
            .filter(challenge::Column::Id.is_in(challenge_ids))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(participants
            .into_iter()
            .filter_map(|p| challenges.get(&p.challenge_id).cloned().map(|c| (p, c)))
            .collect())
    }
}
