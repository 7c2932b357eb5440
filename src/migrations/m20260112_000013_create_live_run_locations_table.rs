// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm_migration::{prelude::*, schema::*};

use super::m20260112_000012_create_live_run_sessions_table::LiveRunSessions;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LiveRunLocations::Table)
                    .if_not_exists()
                    .col(pk_auto(LiveRunLocations::Id))
                    .col(integer(LiveRunLocations::SessionId))
                    .col(double(LiveRunLocations::Latitude))
                    .col(double(LiveRunLocations::Longitude))
                    .col(double_null(LiveRunLocations::Accuracy))
                    .col(double_null(LiveRunLocations::Speed))
                    .col(timestamp(LiveRunLocations::Timestamp).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_live_run_locations_session_id")
                            .from(LiveRunLocations::Table, LiveRunLocations::SessionId)
                            .to(LiveRunSessions::Table, LiveRunSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LiveRunLocations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LiveRunLocations {
    Table,
    Id,
    SessionId,
    Latitude,
    Longitude,
    Accuracy,
    Speed,
    Timestamp,
}
