// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260110_000001_create_users_table::Users, m20260110_000002_create_clubs_table::Clubs,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduledRuns::Table)
                    .if_not_exists()
                    .col(pk_auto(ScheduledRuns::Id))
                    .col(integer(ScheduledRuns::ClubId))
                    .col(integer(ScheduledRuns::CreatedBy))
                    .col(string(ScheduledRuns::Title))
                    .col(text_null(ScheduledRuns::Description))
                    .col(timestamp(ScheduledRuns::ScheduledDate))
                    .col(string_null(ScheduledRuns::Location))
                    .col(timestamp(ScheduledRuns::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scheduled_runs_club_id")
                            .from(ScheduledRuns::Table, ScheduledRuns::ClubId)
                            .to(Clubs::Table, Clubs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scheduled_runs_created_by")
                            .from(ScheduledRuns::Table, ScheduledRuns::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduledRuns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ScheduledRuns {
    Table,
    Id,
    ClubId,
    CreatedBy,
    Title,
    Description,
    ScheduledDate,
    Location,
    CreatedAt,
}
