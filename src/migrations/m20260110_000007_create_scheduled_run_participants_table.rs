// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260110_000001_create_users_table::Users,
    m20260110_000006_create_scheduled_runs_table::ScheduledRuns,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduledRunParticipants::Table)
                    .if_not_exists()
                    .col(integer(ScheduledRunParticipants::UserId))
                    .col(integer(ScheduledRunParticipants::ScheduledRunId))
                    .primary_key(
                        Index::create()
                            .name("pk_scheduled_run_participants")
                            .col(ScheduledRunParticipants::UserId)
                            .col(ScheduledRunParticipants::ScheduledRunId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scheduled_run_participants_user_id")
                            .from(
                                ScheduledRunParticipants::Table,
                                ScheduledRunParticipants::UserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scheduled_run_participants_run_id")
                            .from(
                                ScheduledRunParticipants::Table,
                                ScheduledRunParticipants::ScheduledRunId,
                            )
                            .to(ScheduledRuns::Table, ScheduledRuns::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ScheduledRunParticipants::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum ScheduledRunParticipants {
    Table,
    UserId,
    ScheduledRunId,
}
