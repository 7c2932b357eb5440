// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260110_000001_create_users_table::Users,
    m20260111_000009_create_challenges_table::Challenges,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChallengeParticipants::Table)
                    .if_not_exists()
                    .col(pk_auto(ChallengeParticipants::Id))
                    .col(integer(ChallengeParticipants::ChallengeId))
                    .col(integer(ChallengeParticipants::UserId))
                    .col(double(ChallengeParticipants::ProgressValue).default(0.0))
                    .col(
                        timestamp(ChallengeParticipants::JoinedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challenge_participants_challenge_id")
                            .from(
                                ChallengeParticipants::Table,
                                ChallengeParticipants::ChallengeId,
                            )
                            .to(Challenges::Table, Challenges::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_challenge_participants_user_id")
                            .from(ChallengeParticipants::Table, ChallengeParticipants::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One participation per user per challenge
        manager
            .create_index(
                Index::create()
                    .name("idx_challenge_participants_unique")
                    .table(ChallengeParticipants::Table)
                    .col(ChallengeParticipants::ChallengeId)
                    .col(ChallengeParticipants::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChallengeParticipants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChallengeParticipants {
    Table,
    Id,
    ChallengeId,
    UserId,
    ProgressValue,
    JoinedAt,
}
