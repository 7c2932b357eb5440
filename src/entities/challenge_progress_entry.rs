// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only log of manual progress contributions, with an optional
/// base64-encoded photo.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenge_progress_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub participant_id: i32,
    pub challenge_id: i32,
    pub user_id: i32,
    pub progress_value: f64,
    pub notes: Option<String>,
    #[serde(skip_serializing)]
    pub image_data: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
