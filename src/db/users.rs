// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User storage operations.

use super::Db;
use crate::entities::prelude::User;
use crate::entities::user;
use crate::error::Result;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter};
use std::collections::HashMap;

impl Db {
    /// Get a user by ID.
    pub async fn get_user(&self, user_id: i32) -> Result<Option<user::Model>> {
        Ok(User::find_by_id(user_id).one(&self.conn).await?)
    }

    /// Look up a user by email (emails are unique).
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        Ok(User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.conn)
            .await?)
    }

    /// Create a user with an already-hashed password.
    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
        address: Option<String>,
    ) -> Result<user::Model> {
        let model = user::ActiveModel {
            email: ActiveValue::Set(email.to_string()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            name: ActiveValue::Set(name.to_string()),
            address: ActiveValue::Set(address),
            created_at: ActiveValue::Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model)
    }

    /// Fetch several users at once, keyed by ID. Used when assembling
    /// responses that reference many users (feeds, leaderboards).
    pub async fn get_users_by_ids(&self, ids: Vec<i32>) -> Result<HashMap<i32, user::Model>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = User::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.conn)
            .await?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
