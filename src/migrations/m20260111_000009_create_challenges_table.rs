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
                    .table(Challenges::Table)
                    .if_not_exists()
                    .col(pk_auto(Challenges::Id))
                    .col(integer(Challenges::ClubId))
                    .col(integer(Challenges::CreatedBy))
                    .col(string(Challenges::Title))
                    .col(text_null(Challenges::Description))
                    .col(string(Challenges::ChallengeType))
                    .col(double(Challenges::GoalValue))
                    .col(timestamp(Challenges::StartDate))
                    .col(timestamp(Challenges::EndDate))
                    .col(timestamp(Challenges::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challenges_club_id")
                            .from(Challenges::Table, Challenges::ClubId)
                            .to(Clubs::Table, Clubs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challenges_created_by")
                            .from(Challenges::Table, Challenges::CreatedBy)
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
            .drop_table(Table::drop().table(Challenges::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Challenges {
    Table,
    Id,
    ClubId,
    CreatedBy,
    Title,
    Description,
    ChallengeType,
    GoalValue,
    StartDate,
    EndDate,
    CreatedAt,
}
