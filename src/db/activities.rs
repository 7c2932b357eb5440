// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club activity feed storage.

use super::Db;
use crate::entities::prelude::Activity;
use crate::entities::activity;
use crate::error::Result;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

/// How many feed items a single request returns.
const FEED_LIMIT: u64 = 50;

impl Db {
    /// Latest `run` activities for a club, newest first.
    pub async fn run_feed_for_club(&self, club_id: i32) -> Result<Vec<activity::Model>> {
        Ok(Activity::find()
            .filter(activity::Column::ClubId.eq(club_id))
            .filter(activity::Column::ActivityType.eq("run"))
            .order_by_desc(activity::Column::CreatedAt)
            .limit(FEED_LIMIT)
            .all(&self.conn)
            .await?)
    }
}
