// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm_migration::{prelude::*, schema::*};

use super::m20260110_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Runs::Table)
                    .if_not_exists()
                    .col(pk_auto(Runs::Id))
                    .col(integer(Runs::UserId))
                    .col(double(Runs::DistanceKm))
                    .col(double(Runs::DurationMinutes))
                    .col(double(Runs::SpeedKmh))
                    .col(timestamp(Runs::Date).default(Expr::current_timestamp()))
                    .col(text_null(Runs::Notes))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_runs_user_id")
                            .from(Runs::Table, Runs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_runs_user_date")
                    .table(Runs::Table)
                    .col(Runs::UserId)
                    .col(Runs::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Runs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Runs {
    Table,
    Id,
    UserId,
    DistanceKm,
    DurationMinutes,
    SpeedKmh,
    Date,
    Notes,
}
