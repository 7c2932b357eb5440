// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club storage operations: clubs plus the member and admin association
//! tables.

use super::Db;
use crate::entities::prelude::{Club, ClubAdmin, ClubMember, User};
use crate::entities::{activity, club, club_admin, club_member, user};
use crate::error::Result;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    TransactionTrait,
};

impl Db {
    /// List every club.
    pub async fn list_clubs(&self) -> Result<Vec<club::Model>> {
        Ok(Club::find().all(&self.conn).await?)
    }

    /// Get a club by ID.
    pub async fn get_club(&self, club_id: i32) -> Result<Option<club::Model>> {
        Ok(Club::find_by_id(club_id).one(&self.conn).await?)
    }

    /// Create a club. The creator is added as the first member and a feed
    /// entry is posted, all in one transaction.
    pub async fn create_club(
        &self,
        name: &str,
        description: Option<String>,
        location: Option<String>,
        creator: &user::Model,
    ) -> Result<club::Model> {
        let now = chrono::Utc::now();
        let txn = self.conn.begin().await?;

        let model = club::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(description),
            location: ActiveValue::Set(location),
            created_by: ActiveValue::Set(creator.id),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        ClubMember::insert(club_member::ActiveModel {
            user_id: ActiveValue::Set(creator.id),
            club_id: ActiveValue::Set(model.id),
            joined_at: ActiveValue::Set(now),
        })
        .exec_without_returning(&txn)
        .await?;

        activity::ActiveModel {
            club_id: ActiveValue::Set(model.id),
            user_id: ActiveValue::Set(creator.id),
            activity_type: ActiveValue::Set("join_club".to_string()),
            description: ActiveValue::Set(format!(
                "{} created the club \"{}\"",
                creator.name, model.name
            )),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(model)
    }

    /// Check membership via the association table.
    pub async fn is_club_member(&self, user_id: i32, club_id: i32) -> Result<bool> {
        let found = ClubMember::find_by_id((user_id, club_id))
            .one(&self.conn)
            .await?;
        Ok(found.is_some())
    }

    /// Check if a user is an admin of a club. The creator is always an
    /// admin; anyone else must appear in the club_admins table.
    pub async fn is_club_admin(&self, club_id: i32, user_id: i32) -> Result<bool> {
        let Some(club) = self.get_club(club_id).await? else {
            return Ok(false);
        };
        if club.created_by == user_id {
            return Ok(true);
        }
        let found = ClubAdmin::find_by_id((user_id, club_id))
            .one(&self.conn)
            .await?;
        Ok(found.is_some())
    }

    /// Count members of a club.
    pub async fn club_member_count(&self, club_id: i32) -> Result<u64> {
        Ok(ClubMember::find()
            .filter(club_member::Column::ClubId.eq(club_id))
            .count(&self.conn)
            .await?)
    }

    /// Fetch the full member list of a club.
    pub async fn club_members(&self, club_id: i32) -> Result<Vec<user::Model>> {
        let member_ids: Vec<i32> = ClubMember::find()
            .filter(club_member::Column::ClubId.eq(club_id))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|m| m.user_id)
            .collect();

        if member_ids.is_empty() {
            return Ok(vec![]);
        }
        Ok(User::find()
            .filter(user::Column::Id.is_in(member_ids))
            .all(&self.conn)
            .await?)
    }

    /// Add a user to a club and post the join to the feed.
    pub async fn add_club_member(&self, club_id: i32, joiner: &user::Model) -> Result<()> {
        let now = chrono::Utc::now();
        let txn = self.conn.begin().await?;

        ClubMember::insert(club_member::ActiveModel {
            user_id: ActiveValue::Set(joiner.id),
            club_id: ActiveValue::Set(club_id),
            joined_at: ActiveValue::Set(now),
        })
        .exec_without_returning(&txn)
        .await?;

        activity::ActiveModel {
            club_id: ActiveValue::Set(club_id),
            user_id: ActiveValue::Set(joiner.id),
            activity_type: ActiveValue::Set("join_club".to_string()),
            description: ActiveValue::Set(format!("{} joined the club", joiner.name)),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Check for an explicit admin row (does not cover the creator).
    pub async fn has_admin_row(&self, club_id: i32, user_id: i32) -> Result<bool> {
        let found = ClubAdmin::find_by_id((user_id, club_id))
            .one(&self.conn)
            .await?;
        Ok(found.is_some())
    }

    /// Promote a member to admin.
    pub async fn promote_club_admin(&self, club_id: i32, user_id: i32) -> Result<()> {
        ClubAdmin::insert(club_admin::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            club_id: ActiveValue::Set(club_id),
            promoted_at: ActiveValue::Set(chrono::Utc::now()),
        })
        .exec_without_returning(&self.conn)
        .await?;
        Ok(())
    }

    /// Delete a club. Foreign keys cascade to memberships, scheduled runs,
    /// activities, and challenges.
    pub async fn delete_club(&self, club_id: i32) -> Result<()> {
        Club::delete_by_id(club_id).exec(&self.conn).await?;
        Ok(())
    }
}
