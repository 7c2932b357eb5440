// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schema migrations, run automatically at startup.

pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_users_table;
mod m20260110_000002_create_clubs_table;
mod m20260110_000003_create_club_members_table;
mod m20260110_000004_create_club_admins_table;
mod m20260110_000005_create_runs_table;
mod m20260110_000006_create_scheduled_runs_table;
mod m20260110_000007_create_scheduled_run_participants_table;
mod m20260110_000008_create_activities_table;
mod m20260111_000009_create_challenges_table;
mod m20260111_000010_create_challenge_participants_table;
mod m20260111_000011_create_challenge_progress_entries_table;
mod m20260112_000012_create_live_run_sessions_table;
mod m20260112_000013_create_live_run_locations_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_users_table::Migration),
            Box::new(m20260110_000002_create_clubs_table::Migration),
            Box::new(m20260110_000003_create_club_members_table::Migration),
            Box::new(m20260110_000004_create_club_admins_table::Migration),
            Box::new(m20260110_000005_create_runs_table::Migration),
            Box::new(m20260110_000006_create_scheduled_runs_table::Migration),
            Box::new(m20260110_000007_create_scheduled_run_participants_table::Migration),
            Box::new(m20260110_000008_create_activities_table::Migration),
            Box::new(m20260111_000009_create_challenges_table::Migration),
            Box::new(m20260111_000010_create_challenge_participants_table::Migration),
            Box::new(m20260111_000011_create_challenge_progress_entries_table::Migration),
            Box::new(m20260112_000012_create_live_run_sessions_table::Migration),
            Box::new(m20260112_000013_create_live_run_locations_table::Migration),
        ]
    }
}
