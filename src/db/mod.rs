// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: connection handling plus typed operations grouped by
//! domain (users, clubs, runs, activities, challenges, live runs).

pub mod activities;
pub mod challenges;
pub mod clubs;
pub mod live_runs;
pub mod runs;
pub mod users;

use crate::error::AppError;
use crate::migrations::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// Database handle. Cheap to clone; all typed operations live in the
/// sibling modules as `impl Db` blocks.
#[derive(Clone)]
pub struct Db {
    conn: DatabaseConnection,
}

impl Db {
    /// Connect and bring the schema up to date.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let mut options = ConnectOptions::new(url.to_string());
        // An in-memory SQLite database exists per connection, so the pool
        // must not grow past one. File-backed SQLite is single-writer
        // anyway.
        if url.contains(":memory:") {
            options.max_connections(1);
        } else {
            options.max_connections(5);
        }

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        Migrator::up(&conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;

        Ok(Self { conn })
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }
}
