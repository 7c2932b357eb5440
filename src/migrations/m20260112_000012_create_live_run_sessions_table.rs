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
                    .table(LiveRunSessions::Table)
                    .if_not_exists()
                    .col(pk_auto(LiveRunSessions::Id))
                    .col(integer(LiveRunSessions::UserId))
                    .col(integer_null(LiveRunSessions::ClubId))
                    .col(timestamp(LiveRunSessions::StartedAt).default(Expr::current_timestamp()))
                    .col(
                        timestamp(LiveRunSessions::LastLocationUpdate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(string(LiveRunSessions::Status).default("active"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_live_run_sessions_user_id")
                            .from(LiveRunSessions::Table, LiveRunSessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_live_run_sessions_club_id")
                            .from(LiveRunSessions::Table, LiveRunSessions::ClubId)
                            .to(Clubs::Table, Clubs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LiveRunSessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LiveRunSessions {
    Table,
    Id,
    UserId,
    ClubId,
    StartedAt,
    LastLocationUpdate,
    Status,
}
