// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Club feed entry. `activity_type` is one of `run`, `join_club`,
/// `schedule_run`, or `challenge`; `description` is free text shown in the
/// feed (for runs it embeds distance and speed, see `services::feed`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub club_id: i32,
    pub user_id: i32,
    pub activity_type: String,
    pub description: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
