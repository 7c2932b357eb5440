// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user's standing in a challenge. The meaning of `progress_value`
/// depends on the challenge type: cumulative sum for distance/time
/// challenges, best (lowest) time for fastest_5k with 0 meaning no attempt.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenge_participants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub challenge_id: i32,
    pub user_id: i32,
    pub progress_value: f64,
    pub joined_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
