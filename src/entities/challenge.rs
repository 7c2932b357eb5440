// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Time-boxed club competition. `challenge_type` is one of
/// `weekly_mileage`, `fastest_5k`, `total_distance`, `total_time` and is
/// immutable after creation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub club_id: i32,
    pub created_by: i32,
    pub title: String,
    pub description: Option<String>,
    pub challenge_type: String,
    pub goal_value: f64,
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
