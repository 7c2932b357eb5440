// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260110_000001_create_users_table::Users,
    m20260111_000009_create_challenges_table::Challenges,
    m20260111_000010_create_challenge_participants_table::ChallengeParticipants,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChallengeProgressEntries::Table)
                    .if_not_exists()
                    .col(pk_auto(ChallengeProgressEntries::Id))
                    .col(integer(ChallengeProgressEntries::ParticipantId))
                    .col(integer(ChallengeProgressEntries::ChallengeId))
                    .col(integer(ChallengeProgressEntries::UserId))
                    .col(double(ChallengeProgressEntries::ProgressValue))
                    .col(text_null(ChallengeProgressEntries::Notes))
                    .col(text_null(ChallengeProgressEntries::ImageData))
                    .col(
                        timestamp(ChallengeProgressEntries::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_progress_entries_participant_id")
                            .from(
                                ChallengeProgressEntries::Table,
                                ChallengeProgressEntries::ParticipantId,
                            )
                            .to(ChallengeParticipants::Table, ChallengeParticipants::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_progress_entries_challenge_id")
                            .from(
                                ChallengeProgressEntries::Table,
                                ChallengeProgressEntries::ChallengeId,
                            )
                            .to(Challenges::Table, Challenges::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_progress_entries_user_id")
                            .from(
                                ChallengeProgressEntries::Table,
                                ChallengeProgressEntries::UserId,
                            )
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
            .drop_table(
                Table::drop()
                    .table(ChallengeProgressEntries::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChallengeProgressEntries {
    Table,
    Id,
    ParticipantId,
    ChallengeId,
    UserId,
    ProgressValue,
    Notes,
    ImageData,
    CreatedAt,
}
